use {
    crate::*,
    nom::{bytes::complete::take_while_m_n, combinator::map_res, IResult},
    num::{FromPrimitive, NumCast, PrimInt},
    std::{
        cmp::min,
        fmt::{Debug, Formatter, Result as FmtResult},
        hash::Hash,
        marker::PhantomData,
        str::from_utf8_unchecked,
    },
};

pub trait IndexRawConsts {
    const INVALID: Self;
}

macro_rules! impl_index_raw_consts {
    ( $( $raw:ty, )* ) => { $(
        impl IndexRawConsts for $raw {
            const INVALID: Self = !0;
        }
    )* };
}

impl_index_raw_consts!(u8, u16, u32, u64, usize,);

define_super_trait! {
    pub trait IndexRawTrait where Self: Debug + Default + Hash + PrimInt + NumCast + FromPrimitive + IndexRawConsts {}
}

/// A typed index into an interned-ID table, with an all-ones invalid sentinel.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Index<Raw: IndexRawTrait>(Raw);

impl<Raw: IndexRawTrait> Index<Raw> {
    pub const fn invalid() -> Self {
        Self(Raw::INVALID)
    }

    pub fn new(index: usize) -> Self {
        Self(Raw::from_usize(index).unwrap())
    }

    pub fn is_valid(self) -> bool {
        self != Self::invalid()
    }

    pub fn get(self) -> usize {
        assert!(self.is_valid());

        self.0.to_usize().unwrap()
    }
}

impl<Raw: IndexRawTrait> Debug for Index<Raw> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_valid() {
            f.write_fmt(format_args!("{:?}", self.0))
        } else {
            f.write_str("<invalid>")
        }
    }
}

impl<Raw: IndexRawTrait> Default for Index<Raw> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<Raw: IndexRawTrait> From<usize> for Index<Raw> {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl<Raw: IndexRawTrait> From<Index<Raw>> for usize {
    fn from(value: Index<Raw>) -> Self {
        value.get()
    }
}

type StaticStringLen = u8;

/// A fixed-capacity inline string, suitable for short puzzle identifiers.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StaticString<const N: usize> {
    bytes: [u8; N],
    len: StaticStringLen,
}

impl<const N: usize> StaticString<N> {
    pub fn as_str(&self) -> &str {
        // SAFETY: This always having valid UTF8 bytes is an invariant of the type
        unsafe { from_utf8_unchecked(&self.bytes[..self.len as usize]) }
    }

    pub fn parse_char1<'i, F: Fn(char) -> bool>(
        min: usize,
        f: F,
    ) -> impl FnMut(&'i str) -> IResult<&'i str, Self> {
        map_res(take_while_m_n(min, N, f), Self::try_from)
    }
}

impl<const N: usize> Debug for StaticString<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> Default for StaticString<N> {
    fn default() -> Self {
        Self {
            bytes: [0_u8; N],
            len: 0 as StaticStringLen,
        }
    }
}

impl<const N: usize> TryFrom<&str> for StaticString<N> {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        (value.len() <= min(StaticStringLen::MAX as usize, N))
            .then(|| {
                let mut bytes: [u8; N] = [0_u8; N];

                bytes[..value.len()].copy_from_slice(value.as_bytes());

                Self {
                    bytes,
                    len: value.len() as StaticStringLen,
                }
            })
            .ok_or(())
    }
}

define_super_trait! {
    pub trait IdTrait where Self: Clone + Debug + Eq + Ord + PartialEq + PartialOrd {}
}

/// An interning table mapping IDs to dense indices in first-insertion order.
#[cfg_attr(test, derive(PartialEq))]
#[derive(Default)]
pub struct IdList<Id: IdTrait, Raw: IndexRawTrait = usize> {
    ids: Vec<Id>,
    _raw: PhantomData<Raw>,
}

impl<Id: IdTrait, Raw: IndexRawTrait> IdList<Id, Raw> {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            _raw: PhantomData,
        }
    }

    pub fn as_id_slice(&self) -> &[Id] {
        &self.ids
    }

    pub fn find_index(&self, id: &Id) -> Index<Raw> {
        self.ids
            .iter()
            .position(|existing_id| existing_id == id)
            .map_or_else(Index::default, Index::new)
    }

    pub fn find_or_add_index(&mut self, id: &Id) -> Index<Raw> {
        let mut index: Index<Raw> = self.find_index(id);

        if !index.is_valid() {
            index = self.ids.len().into();
            self.ids.push(id.clone());
        }

        index
    }
}

impl<Id: IdTrait, Raw: IndexRawTrait> Debug for IdList<Id, Raw> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("IdList")?;
        f.debug_list().entries(self.ids.iter().enumerate()).finish()
    }
}

impl<Id: IdTrait, Raw: IndexRawTrait> TryFrom<Vec<Id>> for IdList<Id, Raw> {
    type Error = Box<String>;

    fn try_from(ids: Vec<Id>) -> Result<Self, Self::Error> {
        let mut sorted_ids: Vec<Id> = ids.clone();

        sorted_ids.sort();
        sorted_ids.dedup();

        if sorted_ids.len() != ids.len() {
            Err(format!("`IdList::try_from` failed because there were duplicate IDs present.")
                .into())
        } else {
            Ok(Self {
                ids,
                _raw: PhantomData,
            })
        }
    }
}

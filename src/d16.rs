use {
    crate::*,
    bitvec::prelude::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{all_consuming, map, opt},
        error::Error,
        multi::{many0, separated_list1},
        sequence::{preceded, terminated, tuple},
        Err, IResult,
    },
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
    static_assertions::const_assert,
    std::collections::{HashMap, VecDeque},
};

type Pressure = u32;

type ValveIndexRaw = u8;
type ValveIndex = Index<ValveIndexRaw>;

const VALVE_TAG_LEN: usize = 2_usize;

type ValveTag = StaticString<VALVE_TAG_LEN>;
type ValveTagList = IdList<ValveTag, ValveIndexRaw>;

const MAX_VALVE_COUNT: usize = 64_usize;
const MAX_RELEVANT_VALVE_COUNT: usize = 16_usize;
const MAX_AGENT_COUNT: usize = 2_usize;

type RelevantIndexRaw = u8;
type RelevantIndex = Index<RelevantIndexRaw>;

// The invalid sentinel must stay out of the valid index ranges.
const_assert!(MAX_VALVE_COUNT < ValveIndexRaw::MAX as usize);
const_assert!(MAX_RELEVANT_VALVE_COUNT < RelevantIndexRaw::MAX as usize);

/// One bit per valve with a positive flow rate, in scan-line order.
type RelevantValveBitArr = BitArr!(for MAX_RELEVANT_VALVE_COUNT, in u16);

#[cfg_attr(test, derive(Debug, PartialEq))]
struct ScanLine {
    tag: ValveTag,
    flow_rate: Pressure,
    neighbor_tags: Vec<ValveTag>,
}

impl ScanLine {
    fn parse_tag<'i>(input: &'i str) -> IResult<&'i str, ValveTag> {
        ValveTag::parse_char1(VALVE_TAG_LEN, |c| c.is_ascii_uppercase())(input)
    }
}

impl Parse for ScanLine {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                preceded(tag("Valve "), Self::parse_tag),
                preceded(tag(" has flow rate="), parse_integer::<Pressure>),
                preceded(
                    tuple((
                        tag("; "),
                        alt((
                            tag("tunnels lead to valves "),
                            tag("tunnel leads to valve "),
                        )),
                    )),
                    separated_list1(tag(", "), Self::parse_tag),
                ),
            )),
            |(valve_tag, flow_rate, neighbor_tags)| Self {
                tag: valve_tag,
                flow_rate,
                neighbor_tags,
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Valve {
    flow_rate: Pressure,
    neighbors: Vec<ValveIndex>,

    /// Bit position within `RelevantValveBitArr`, invalid for zero flow rate.
    relevant_index: RelevantIndex,
}

#[derive(Debug, PartialEq)]
pub enum ParseSolutionError<'i> {
    ScanLines(Err<Error<&'i str>>),
    DuplicateValveTag(ValveTag),
    UndefinedNeighborTag {
        valve_tag: ValveTag,
        neighbor_tag: ValveTag,
    },
    StartValveNotPresent,
    TooManyValves(usize),
    TooManyRelevantValves(usize),
}

#[derive(Debug, PartialEq)]
pub struct StateBudgetExceededError {
    pub state_count: usize,
    pub state_budget: usize,
}

/// The deduplication key for the frontier: where every agent currently is, plus which relevant
/// valves are already open. Two search paths meeting on the same key are interchangeable except
/// for their released pressure, so only the larger pressure survives.
///
/// Agent order is not canonicalized: `(a, b)` and `(b, a)` are distinct keys.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
struct State {
    positions: [ValveIndex; MAX_AGENT_COUNT],
    open_valves: RelevantValveBitArr,
}

type Frontier = HashMap<State, Pressure>;

#[derive(Clone, Copy)]
struct AgentAction {
    position: ValveIndex,

    /// Valid iff the agent stays put to open its current valve.
    activated_relevant_index: RelevantIndex,
}

struct PressureReleaseSearcher<'s> {
    solution: &'s Solution,
    agent_count: usize,
    time_steps: Pressure,
    state_budget: Option<usize>,
    verbose: bool,
    frontier: Frontier,
}

impl<'s> PressureReleaseSearcher<'s> {
    fn new(
        solution: &'s Solution,
        agent_count: usize,
        time_steps: Pressure,
        state_budget: Option<usize>,
        verbose: bool,
    ) -> Self {
        assert!((1_usize..=MAX_AGENT_COUNT).contains(&agent_count));

        let mut start_state: State = State::default();

        start_state.positions[..agent_count].fill(solution.start);

        Self {
            solution,
            agent_count,
            time_steps,
            state_budget,
            verbose,
            frontier: [(start_state, 0 as Pressure)].into_iter().collect(),
        }
    }

    fn insert_max(frontier: &mut Frontier, state: State, pressure: Pressure) {
        let best_pressure: &mut Pressure = frontier.entry(state).or_default();

        *best_pressure = (*best_pressure).max(pressure);
    }

    fn expand_state(
        &self,
        state: &State,
        pressure: Pressure,
        remaining_time_steps: Pressure,
        frontier: &mut Frontier,
    ) {
        if state.open_valves == self.solution.relevant_valve_mask {
            // Nothing left to open; the state rides out the clock unchanged.
            Self::insert_max(frontier, *state, pressure);

            return;
        }

        let agent_actions: Vec<Vec<AgentAction>> = state.positions[..self.agent_count]
            .iter()
            .map(|&position| {
                let valve: &Valve = &self.solution.valves[position.get()];
                let mut actions: Vec<AgentAction> = valve
                    .neighbors
                    .iter()
                    .map(|&neighbor| AgentAction {
                        position: neighbor,
                        activated_relevant_index: RelevantIndex::invalid(),
                    })
                    .collect();

                // Staying put is only legal to open a closed, relevant valve. Legality is judged
                // against the open set as it stood entering the tick.
                if valve.relevant_index.is_valid() && !state.open_valves[valve.relevant_index.get()]
                {
                    actions.push(AgentAction {
                        position,
                        activated_relevant_index: valve.relevant_index,
                    });
                }

                actions
            })
            .collect();

        let mut action_indices: [usize; MAX_AGENT_COUNT] = [0_usize; MAX_AGENT_COUNT];

        'joint_actions: loop {
            let mut candidate_state: State = *state;
            let mut candidate_pressure: Pressure = pressure;
            let mut is_candidate_valid: bool = true;

            for (agent, actions) in agent_actions.iter().enumerate() {
                let action: AgentAction = actions[action_indices[agent]];

                candidate_state.positions[agent] = action.position;

                if action.activated_relevant_index.is_valid() {
                    let relevant_index: usize = action.activated_relevant_index.get();

                    // Two agents on the same valve can't both open it this tick.
                    if candidate_state.open_valves[relevant_index] {
                        is_candidate_valid = false;

                        break;
                    }

                    candidate_state.open_valves.set(relevant_index, true);
                    candidate_pressure += self.solution.valves[action.position.get()].flow_rate
                        * remaining_time_steps;
                }
            }

            if is_candidate_valid {
                Self::insert_max(frontier, candidate_state, candidate_pressure);
            }

            for agent in 0_usize.. {
                if agent == self.agent_count {
                    break 'joint_actions;
                }

                action_indices[agent] += 1_usize;

                if action_indices[agent] < agent_actions[agent].len() {
                    break;
                }

                action_indices[agent] = 0_usize;
            }
        }
    }

    /// Computes the next frontier from the current one. The max-merge is commutative, so the
    /// parallel reduction is deterministic.
    fn step(&self, remaining_time_steps: Pressure) -> Frontier {
        self.frontier
            .par_iter()
            .fold(Frontier::new, |mut frontier, (state, &pressure)| {
                self.expand_state(state, pressure, remaining_time_steps, &mut frontier);

                frontier
            })
            .reduce(Frontier::new, |frontier_a, frontier_b| {
                let (mut frontier, other_frontier): (Frontier, Frontier) =
                    if frontier_a.len() >= frontier_b.len() {
                        (frontier_a, frontier_b)
                    } else {
                        (frontier_b, frontier_a)
                    };

                for (state, pressure) in other_frontier {
                    Self::insert_max(&mut frontier, state, pressure);
                }

                frontier
            })
    }

    fn run(&mut self) -> Result<Pressure, StateBudgetExceededError> {
        for time in 0 as Pressure..self.time_steps {
            self.frontier = self.step(self.time_steps - time - 1);

            if self.verbose {
                println!("time step {}: {} frontier states", time, self.frontier.len());
            }

            if let Some(state_budget) = self.state_budget {
                let state_count: usize = self.frontier.len();

                if state_count > state_budget {
                    return Err(StateBudgetExceededError {
                        state_count,
                        state_budget,
                    });
                }
            }
        }

        Ok(self.frontier.values().copied().max().unwrap_or_default())
    }
}

struct ValveDistanceFinder<'s> {
    solution: &'s Solution,
    end: ValveIndex,
    parent_map: HashMap<ValveIndex, ValveIndex>,
}

impl<'s> BreadthFirstSearch for ValveDistanceFinder<'s> {
    type Vertex = ValveIndex;

    fn start(&self) -> &Self::Vertex {
        &self.solution.start
    }

    fn is_end(&self, vertex: &Self::Vertex) -> bool {
        *vertex == self.end
    }

    fn path_to(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex> {
        let mut path: VecDeque<ValveIndex> = VecDeque::new();
        let mut vertex: ValveIndex = *vertex;

        while vertex != self.solution.start {
            path.push_front(vertex);
            vertex = self.parent_map[&vertex];
        }

        path.push_front(vertex);

        path.into()
    }

    fn neighbors(&self, vertex: &Self::Vertex, neighbors: &mut Vec<Self::Vertex>) {
        neighbors.clear();
        neighbors.extend(self.solution.valves[vertex.get()].neighbors.iter().copied());
    }

    fn update_parent(&mut self, from: &Self::Vertex, to: &Self::Vertex) {
        self.parent_map.insert(*to, *from);
    }

    fn reset(&mut self) {
        self.parent_map.clear();
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    valve_tags: ValveTagList,
    valves: Vec<Valve>,
    start: ValveIndex,

    /// All relevant bits set; a state matching this mask has nothing left to do.
    relevant_valve_mask: RelevantValveBitArr,
}

impl Solution {
    const START_VALVE_TAG_STR: &'static str = "AA";
    const SOLO_AGENT_COUNT: usize = 1_usize;
    const SOLO_TIME_STEPS: Pressure = 30 as Pressure;
    const PAIRED_AGENT_COUNT: usize = 2_usize;
    const PAIRED_TIME_STEPS: Pressure = 26 as Pressure;

    fn start_valve_tag() -> ValveTag {
        Self::START_VALVE_TAG_STR.try_into().unwrap()
    }

    /// The most pressure releasable by `agent_count` agents within `time_steps` minutes, failing
    /// fast if any per-tick frontier outgrows `state_budget`.
    pub fn try_maximal_pressure_release(
        &self,
        agent_count: usize,
        time_steps: Pressure,
        state_budget: Option<usize>,
    ) -> Result<Pressure, StateBudgetExceededError> {
        PressureReleaseSearcher::new(self, agent_count, time_steps, state_budget, false).run()
    }

    fn maximal_pressure_release(
        &self,
        agent_count: usize,
        time_steps: Pressure,
        verbose: bool,
    ) -> Pressure {
        // Without a state budget the search can't fail.
        PressureReleaseSearcher::new(self, agent_count, time_steps, None, verbose)
            .run()
            .unwrap()
    }

    fn solo_maximal_pressure_release(&self, verbose: bool) -> Pressure {
        self.maximal_pressure_release(Self::SOLO_AGENT_COUNT, Self::SOLO_TIME_STEPS, verbose)
    }

    fn paired_maximal_pressure_release(&self, verbose: bool) -> Pressure {
        self.maximal_pressure_release(Self::PAIRED_AGENT_COUNT, Self::PAIRED_TIME_STEPS, verbose)
    }

    fn relevant_valve_distances(&self) -> Vec<(ValveTag, Option<usize>)> {
        let mut valve_distance_finder: ValveDistanceFinder = ValveDistanceFinder {
            solution: self,
            end: ValveIndex::invalid(),
            parent_map: HashMap::new(),
        };

        self.valves
            .iter()
            .enumerate()
            .filter(|(_, valve)| valve.relevant_index.is_valid())
            .map(|(valve_index, _)| {
                valve_distance_finder.end = valve_index.into();

                let distance: Option<usize> = valve_distance_finder
                    .run()
                    .map(|path| path.len() - 1_usize);

                (self.valve_tags.as_id_slice()[valve_index], distance)
            })
            .collect()
    }

    fn print_relevant_valve_distances(&self) {
        for (valve_tag, distance) in self.relevant_valve_distances() {
            match distance {
                Some(distance) => println!(
                    "valve {valve_tag:?} is {distance} tunnels from {}",
                    Self::START_VALVE_TAG_STR
                ),
                None => println!(
                    "valve {valve_tag:?} is unreachable from {}",
                    Self::START_VALVE_TAG_STR
                ),
            }
        }
    }

    fn parse_scan_lines<'i>(input: &'i str) -> IResult<&'i str, Vec<ScanLine>> {
        all_consuming(many0(terminated(ScanLine::parse, opt(line_ending))))(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, args: &QuestionArgs) {
        if args.verbose {
            self.print_relevant_valve_distances();
        }

        dbg!(self.solo_maximal_pressure_release(args.verbose));
    }

    fn q2_internal(&mut self, args: &QuestionArgs) {
        dbg!(self.paired_maximal_pressure_release(args.verbose));
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = ParseSolutionError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        use ParseSolutionError as Error;

        let scan_lines: Vec<ScanLine> = Self::parse_scan_lines(input)
            .map_err(Error::ScanLines)?
            .1;

        if scan_lines.len() > MAX_VALVE_COUNT {
            return Err(Error::TooManyValves(scan_lines.len()));
        }

        let mut valve_tags: ValveTagList = ValveTagList::new();

        for (valve_index, scan_line) in scan_lines.iter().enumerate() {
            if valve_tags.find_or_add_index(&scan_line.tag).get() != valve_index {
                return Err(Error::DuplicateValveTag(scan_line.tag));
            }
        }

        let mut relevant_valve_count: usize = 0_usize;
        let mut valves: Vec<Valve> = Vec::with_capacity(scan_lines.len());

        for scan_line in scan_lines.iter() {
            let mut neighbors: Vec<ValveIndex> = Vec::with_capacity(scan_line.neighbor_tags.len());

            for neighbor_tag in scan_line.neighbor_tags.iter() {
                let neighbor: ValveIndex = valve_tags.find_index(neighbor_tag);

                if !neighbor.is_valid() {
                    return Err(Error::UndefinedNeighborTag {
                        valve_tag: scan_line.tag,
                        neighbor_tag: *neighbor_tag,
                    });
                }

                neighbors.push(neighbor);
            }

            let relevant_index: RelevantIndex = if scan_line.flow_rate > 0 as Pressure {
                relevant_valve_count += 1_usize;

                RelevantIndex::new(relevant_valve_count - 1_usize)
            } else {
                RelevantIndex::invalid()
            };

            valves.push(Valve {
                flow_rate: scan_line.flow_rate,
                neighbors,
                relevant_index,
            });
        }

        if relevant_valve_count > MAX_RELEVANT_VALVE_COUNT {
            return Err(Error::TooManyRelevantValves(relevant_valve_count));
        }

        let start: ValveIndex = valve_tags.find_index(&Self::start_valve_tag());

        if !start.is_valid() {
            return Err(Error::StartValveNotPresent);
        }

        let mut relevant_valve_mask: RelevantValveBitArr = RelevantValveBitArr::ZERO;

        relevant_valve_mask[..relevant_valve_count].fill(true);

        Ok(Self {
            valve_tags,
            valves,
            start,
            relevant_valve_mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SOLUTION_STR: &'static str = "\
        Valve AA has flow rate=0; tunnels lead to valves DD, II, BB\n\
        Valve BB has flow rate=13; tunnels lead to valves CC, AA\n\
        Valve CC has flow rate=2; tunnels lead to valves DD, BB\n\
        Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE\n\
        Valve EE has flow rate=3; tunnels lead to valves FF, DD\n\
        Valve FF has flow rate=0; tunnels lead to valves EE, GG\n\
        Valve GG has flow rate=0; tunnels lead to valves FF, HH\n\
        Valve HH has flow rate=22; tunnel leads to valve GG\n\
        Valve II has flow rate=0; tunnels lead to valves AA, JJ\n\
        Valve JJ has flow rate=21; tunnel leads to valve II\n";

    const ZERO_FLOW_SOLUTION_STR: &'static str = "\
        Valve AA has flow rate=0; tunnel leads to valve BB\n\
        Valve BB has flow rate=0; tunnel leads to valve AA\n";

    const CHAIN_SOLUTION_STR: &'static str = "\
        Valve AA has flow rate=0; tunnel leads to valve AB\n\
        Valve AB has flow rate=0; tunnels lead to valves AA, AC\n\
        Valve AC has flow rate=0; tunnels lead to valves AB, AD\n\
        Valve AD has flow rate=9; tunnel leads to valve AC\n";

    const CHAIN_FLOW_RATE: Pressure = 9 as Pressure;
    const CHAIN_DISTANCE: Pressure = 3 as Pressure;

    fn valve_tag(tag_str: &str) -> ValveTag {
        tag_str.try_into().unwrap()
    }

    fn valve(flow_rate: Pressure, neighbors: &[usize], relevant_index: Option<usize>) -> Valve {
        Valve {
            flow_rate,
            neighbors: neighbors.iter().copied().map(ValveIndex::new).collect(),
            relevant_index: relevant_index.map_or_else(RelevantIndex::invalid, RelevantIndex::new),
        }
    }

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| {
            let valve_tags: ValveTagList = [
                "AA", "BB", "CC", "DD", "EE", "FF", "GG", "HH", "II", "JJ",
            ]
            .into_iter()
            .map(valve_tag)
            .collect::<Vec<ValveTag>>()
            .try_into()
            .unwrap();

            let mut relevant_valve_mask: RelevantValveBitArr = RelevantValveBitArr::ZERO;

            relevant_valve_mask[..6_usize].fill(true);

            Solution {
                valve_tags,
                valves: vec![
                    valve(0, &[3_usize, 8_usize, 1_usize], None),
                    valve(13, &[2_usize, 0_usize], Some(0_usize)),
                    valve(2, &[3_usize, 1_usize], Some(1_usize)),
                    valve(20, &[2_usize, 0_usize, 4_usize], Some(2_usize)),
                    valve(3, &[5_usize, 3_usize], Some(3_usize)),
                    valve(0, &[4_usize, 6_usize], None),
                    valve(0, &[5_usize, 7_usize], None),
                    valve(22, &[6_usize], Some(4_usize)),
                    valve(0, &[0_usize, 9_usize], None),
                    valve(21, &[8_usize], Some(5_usize)),
                ],
                start: ValveIndex::new(0_usize),
                relevant_valve_mask,
            }
        })
    }

    /// Exhaustive single-agent search with no dominance pruning, for cross-checking that the
    /// pruned frontier never loses the optimum on small inputs.
    fn brute_force_maximal_pressure_release(
        solution: &Solution,
        position: ValveIndex,
        open_valves: RelevantValveBitArr,
        time_steps: Pressure,
    ) -> Pressure {
        if time_steps == 0 as Pressure {
            return 0 as Pressure;
        }

        let remaining_time_steps: Pressure = time_steps - 1;
        let valve: &Valve = &solution.valves[position.get()];
        let mut best_pressure: Pressure = 0 as Pressure;

        if valve.relevant_index.is_valid() && !open_valves[valve.relevant_index.get()] {
            let mut candidate_open_valves: RelevantValveBitArr = open_valves;

            candidate_open_valves.set(valve.relevant_index.get(), true);
            best_pressure = best_pressure.max(
                valve.flow_rate * remaining_time_steps
                    + brute_force_maximal_pressure_release(
                        solution,
                        position,
                        candidate_open_valves,
                        remaining_time_steps,
                    ),
            );
        }

        for &neighbor in valve.neighbors.iter() {
            best_pressure = best_pressure.max(brute_force_maximal_pressure_release(
                solution,
                neighbor,
                open_valves,
                remaining_time_steps,
            ));
        }

        best_pressure
    }

    #[test]
    fn test_try_from_str() {
        assert_eq!(Solution::try_from(SOLUTION_STR).as_ref(), Ok(solution()));
    }

    #[test]
    fn test_try_from_str_errors() {
        assert_eq!(
            Solution::try_from(
                "Valve AA has flow rate=0; tunnels lead to valves BB, ZZ\n\
                Valve BB has flow rate=1; tunnel leads to valve AA\n"
            ),
            Err(ParseSolutionError::UndefinedNeighborTag {
                valve_tag: valve_tag("AA"),
                neighbor_tag: valve_tag("ZZ"),
            })
        );
        assert_eq!(
            Solution::try_from(
                "Valve BB has flow rate=1; tunnel leads to valve CC\n\
                Valve CC has flow rate=2; tunnel leads to valve BB\n"
            ),
            Err(ParseSolutionError::StartValveNotPresent)
        );
        assert_eq!(
            Solution::try_from(
                "Valve AA has flow rate=0; tunnel leads to valve AA\n\
                Valve AA has flow rate=0; tunnel leads to valve AA\n"
            ),
            Err(ParseSolutionError::DuplicateValveTag(valve_tag("AA")))
        );
    }

    #[test]
    fn test_solo_maximal_pressure_release() {
        assert_eq!(solution().solo_maximal_pressure_release(false), 1651_u32);
    }

    #[test]
    fn test_paired_maximal_pressure_release() {
        assert_eq!(solution().paired_maximal_pressure_release(false), 1707_u32);
    }

    #[test]
    fn test_monotonic_horizon() {
        let mut previous_pressure: Pressure = 0 as Pressure;

        for time_steps in 0 as Pressure..=15 as Pressure {
            let pressure: Pressure = solution()
                .try_maximal_pressure_release(1_usize, time_steps, None)
                .unwrap();

            assert!(
                pressure >= previous_pressure,
                "pressure {pressure} for {time_steps} time steps is lower than {previous_pressure}"
            );

            previous_pressure = pressure;
        }
    }

    #[test]
    fn test_zero_relevant_valves() {
        let solution: Solution = Solution::try_from(ZERO_FLOW_SOLUTION_STR).unwrap();

        for agent_count in 1_usize..=MAX_AGENT_COUNT {
            for time_steps in [0 as Pressure, 1 as Pressure, 5 as Pressure, 30 as Pressure] {
                assert_eq!(
                    solution
                        .try_maximal_pressure_release(agent_count, time_steps, None)
                        .unwrap(),
                    0_u32
                );
            }
        }
    }

    #[test]
    fn test_single_relevant_valve_chain() {
        let solution: Solution = Solution::try_from(CHAIN_SOLUTION_STR).unwrap();

        for time_steps in 0 as Pressure..=10 as Pressure {
            let expected_pressure: Pressure = if time_steps > CHAIN_DISTANCE {
                CHAIN_FLOW_RATE * (time_steps - CHAIN_DISTANCE - 1)
            } else {
                0 as Pressure
            };

            assert_eq!(
                solution
                    .try_maximal_pressure_release(1_usize, time_steps, None)
                    .unwrap(),
                expected_pressure,
                "mismatch for {time_steps} time steps"
            );
        }
    }

    #[test]
    fn test_paired_not_worse_than_solo() {
        for time_steps in [5 as Pressure, 10 as Pressure, 26 as Pressure] {
            let solo_pressure: Pressure = solution()
                .try_maximal_pressure_release(1_usize, time_steps, None)
                .unwrap();
            let paired_pressure: Pressure = solution()
                .try_maximal_pressure_release(2_usize, time_steps, None)
                .unwrap();

            assert!(paired_pressure >= solo_pressure);
        }
    }

    #[test]
    fn test_pruned_search_matches_brute_force() {
        let chain_solution: Solution = Solution::try_from(CHAIN_SOLUTION_STR).unwrap();

        for (solution, max_time_steps) in
            [(&chain_solution, 8 as Pressure), (solution(), 7 as Pressure)]
        {
            for time_steps in 0 as Pressure..=max_time_steps {
                assert_eq!(
                    solution
                        .try_maximal_pressure_release(1_usize, time_steps, None)
                        .unwrap(),
                    brute_force_maximal_pressure_release(
                        solution,
                        solution.start,
                        RelevantValveBitArr::ZERO,
                        time_steps
                    ),
                    "mismatch for {time_steps} time steps"
                );
            }
        }
    }

    #[test]
    fn test_state_budget_exceeded() {
        // From (AA, AA), each agent has three tunnels and no valve to open, so the first tick
        // already produces nine joint positions.
        assert_eq!(
            solution().try_maximal_pressure_release(
                Solution::PAIRED_AGENT_COUNT,
                Solution::PAIRED_TIME_STEPS,
                Some(1_usize)
            ),
            Err(StateBudgetExceededError {
                state_count: 9_usize,
                state_budget: 1_usize,
            })
        );
        assert!(solution()
            .try_maximal_pressure_release(
                Solution::PAIRED_AGENT_COUNT,
                Solution::PAIRED_TIME_STEPS,
                Some(1_usize << 20_u32)
            )
            .is_ok());
    }

    #[test]
    fn test_determinism() {
        assert_eq!(
            solution().try_maximal_pressure_release(2_usize, 10 as Pressure, None),
            solution().try_maximal_pressure_release(2_usize, 10 as Pressure, None)
        );
    }

    #[test]
    fn test_relevant_valve_distances() {
        assert_eq!(
            solution().relevant_valve_distances(),
            vec![
                (valve_tag("BB"), Some(1_usize)),
                (valve_tag("CC"), Some(2_usize)),
                (valve_tag("DD"), Some(1_usize)),
                (valve_tag("EE"), Some(2_usize)),
                (valve_tag("HH"), Some(5_usize)),
                (valve_tag("JJ"), Some(2_usize)),
            ]
        );
    }
}

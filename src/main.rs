use {aoc2022::*, clap::Parser};

fn main() {
    solutions().run(&Args::parse());
}

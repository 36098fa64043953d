use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Minutes added by each duration button, left to right.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..=999),
        default_values_t = [5, 15, 30, 60]
    )]
    pub increments: Vec<u32>,

    /// Size of a single display pixel on screen.
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=16),
        default_value_t = 4
    )]
    pub scale: u32,
}

use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Terminal-state monitor ticks per second",
        default_value_t = 10.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frames per second for physics and rendering",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,
}

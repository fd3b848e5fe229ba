use anyhow::Context;
use clap::Parser;
use cmask::Mask;


#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CLI {
    /// Three mask flags, comma separated
    #[arg(long, default_value = "1,0,0")]
    pub mask: String,

    /// Sample sequence to apply the mask to
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "1,2,3,4,5,6,7",
        allow_negative_numbers = true
    )]
    pub data: Vec<i32>,

    /// Multiplier applied at the kept positions
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    pub factor: i32
}


impl CLI {
    pub fn build_mask(&self) -> anyhow::Result<Mask<3>> {
        self.mask.parse().with_context(|| {
            format!("failed to build mask from '{}'", self.mask)
        })
    }
}

//! review-board command-line entry point

use anyhow::Result;

fn main() -> Result<()> {
    review_board::cli::run()
}

use anyhow::Result;

fn main() -> Result<()> {
    period_archive::cli::run()
}

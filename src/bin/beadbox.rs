use anyhow::Result;

fn main() -> Result<()> {
    beadbox::cli::run()
}

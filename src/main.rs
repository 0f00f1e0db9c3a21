use anyhow::Result;

fn main() -> Result<()> {
    medivoice_transcript::cli::run()
}

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    piodata_log::init(piodata_log::C_DEFAULT_DIRECTIVE);

    let outcome = piodata_prebuild::run().context("pre-build data staging failed")?;
    println!("{}", outcome.status_line());
    Ok(())
}

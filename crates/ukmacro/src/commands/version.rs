pub fn run() -> anyhow::Result<()> {
    println!("ukmacro {}", env!("CARGO_PKG_VERSION"));
    println!("Time-series merge engine for the UK macroeconomic report");
    Ok(())
}

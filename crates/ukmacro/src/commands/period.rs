use ukmacro_core::period::{format_date, parse_period};

pub fn run(token: &str) -> anyhow::Result<()> {
    println!("{}", resolve(token)?);
    Ok(())
}

fn resolve(token: &str) -> anyhow::Result<String> {
    match parse_period(token) {
        Some(date) => Ok(format_date(date)),
        None => anyhow::bail!("'{}' is not a period token like Jan-24", token),
    }
}

use crate::api::Period;
use crate::error::Result;

pub fn run(from_date: &str, to_date: &str) -> Result<()> {
    let body = Period::parse(from_date, to_date)?.to_request();
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

use super::load_plan;
use crate::error::Result;
use crate::render;
use std::path::Path;

pub fn run(plan_path: &Path) -> Result<()> {
    let plan = load_plan(plan_path)?;
    print!("{}", render::summary(&plan));
    println!();
    print!("{}", render::seating_chart(&plan));
    println!();
    print!("{}", render::roster(&plan));
    Ok(())
}

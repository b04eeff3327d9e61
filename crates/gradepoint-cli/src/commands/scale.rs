//! The `gradepoint scale` command.

use anyhow::Result;

use gradepoint_core::grade::GradeTable;

pub fn execute() -> Result<()> {
    println!("Grade scale (4.0)");
    for (grade, points) in GradeTable::STANDARD.entries() {
        println!("  {:<3} {points:.1}", grade.as_str());
    }
    Ok(())
}

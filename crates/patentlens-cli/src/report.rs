//! Console summary of a finished run.

use colored::Colorize;
use patentlens_pipeline::RunReport;

pub fn print_report(report: &RunReport) {
    for step in &report.steps {
        println!(
            "  {:<28} {:>10} rows  {:>8.2}s",
            step.label,
            step.rows,
            step.elapsed.as_secs_f64()
        );
    }
    println!(
        "{} {}",
        "wrote".green().bold(),
        report.output.display().to_string().bold()
    );

    // Each recipe leads with the count it is run for.
    match report.recipe {
        "text_cpc" => {
            println!("rows: {}", report.rows.to_string().bold());
            println!("distinct patents: {}", report.distinct_patents);
        }
        _ => {
            println!(
                "distinct patents: {}",
                report.distinct_patents.to_string().bold()
            );
            println!("rows: {}", report.rows);
        }
    }
}

//! Run summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PipelineRun;

/// Summary of one training and prediction run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub train_rows: usize,
    pub eval_rows: usize,
    pub raw_columns: usize,
    pub feature_columns: usize,
    pub train_accuracy: f64,
    pub eval_accuracy: Option<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub load_time: Duration,
    pub pipeline_time: Duration,
    pub save_time: Duration,
}

impl RunSummary {
    pub fn from_run<M>(run: &PipelineRun<M>, raw_columns: usize) -> Self {
        Self {
            train_rows: run.train_shape.0,
            eval_rows: run.eval_shape.0,
            raw_columns,
            feature_columns: run.train_shape.1,
            train_accuracy: run.train_accuracy,
            eval_accuracy: run.eval_accuracy,
            iterations: run.iterations,
            converged: run.convergence_warning.is_none(),
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, duration: Duration) {
        self.load_time = duration;
    }

    pub fn set_pipeline_time(&mut self, duration: Duration) {
        self.pipeline_time = duration;
    }

    pub fn set_save_time(&mut self, duration: Duration) {
        self.save_time = duration;
    }

    fn total_time(&self) -> Duration {
        self.load_time + self.pipeline_time + self.save_time
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows (train / evaluation)"),
            Cell::new(format!("{} / {}", self.train_rows, self.eval_rows)),
        ]);
        table.add_row(vec![
            Cell::new("🧮 Columns (raw → features)"),
            Cell::new(format!("{} → {}", self.raw_columns, self.feature_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🔁 Solver iterations"),
            Cell::new(self.iterations).fg(if self.converged {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🎯 Training accuracy"),
            Cell::new(format!("{:.4}", self.train_accuracy))
                .fg(accuracy_color(self.train_accuracy))
                .add_attribute(Attribute::Bold),
        ]);

        let eval_cell = match self.eval_accuracy {
            Some(acc) => Cell::new(format!("{:.4}", acc))
                .fg(accuracy_color(acc))
                .add_attribute(Attribute::Bold),
            None => Cell::new("n/a (no ground truth)").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new("🧪 Evaluation accuracy"), eval_cell]);

        table.add_row(vec![
            Cell::new("⏱️  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

fn accuracy_color(accuracy: f64) -> Color {
    if accuracy >= 0.8 {
        Color::Green
    } else if accuracy >= 0.6 {
        Color::Yellow
    } else {
        Color::Red
    }
}

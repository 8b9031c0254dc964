//! Reduction summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{AnalysisReport, AnalysisResult, Approximation, Method, Rule};

/// Maximum rules listed in the terminal summary
const MAX_RULES_SHOWN: usize = 15;

/// Summary of one analysis run, for terminal display
#[derive(Debug, Clone)]
pub struct ReductionSummary {
    pub method: Method,
    pub original_size: usize,
    pub consistent_size: usize,
    pub removed: Vec<String>,
    pub rules_count: Option<usize>,
    pub approximations: Vec<Approximation>,
    pub rules: Vec<Rule>,
}

impl ReductionSummary {
    pub fn from_report(method: Method, report: &AnalysisReport) -> Self {
        let sizes = report.result.summary();
        let (approximations, rules) = match &report.result {
            AnalysisResult::Qualitative(r) => (r.approximations.clone(), Vec::new()),
            AnalysisResult::Quantitative(r) => (Vec::new(), r.rules.clone()),
        };

        Self {
            method,
            original_size: sizes.original_size,
            consistent_size: sizes.consistent_size,
            removed: report.result.removed_objects().to_vec(),
            rules_count: sizes.rules_count,
            approximations,
            rules,
        }
    }

    /// Percentage of rows removed
    pub fn reduction_pct(&self) -> f64 {
        if self.original_size > 0 {
            ((self.original_size - self.consistent_size) as f64 / self.original_size as f64)
                * 100.0
        } else {
            0.0
        }
    }

    pub fn display(&self) {
        print_section_title("📋", "REDUCTION SUMMARY");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🧭 Method"), Cell::new(self.method)]);
        table.add_row(vec![
            Cell::new("📁 Original Objects"),
            Cell::new(self.original_size),
        ]);
        if let Some(rules_count) = self.rules_count {
            table.add_row(vec![Cell::new("📐 Rules Generated"), Cell::new(rules_count)]);
        }
        table.add_row(vec![
            Cell::new("🗑️  Removed Objects"),
            Cell::new(self.removed.len()).fg(if self.removed.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Consistent Objects"),
            Cell::new(self.consistent_size)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let reduction_pct = self.reduction_pct();
        let color = if reduction_pct > 30.0 {
            Color::Red
        } else if reduction_pct > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };
        table.add_row(vec![
            Cell::new("📉 Reduction"),
            Cell::new(format!("{:.1}%", reduction_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        print_indented(&table);

        if !self.approximations.is_empty() {
            self.display_approximations();
        }
        if !self.rules.is_empty() {
            self.display_rules();
        }

        if !self.removed.is_empty() {
            print_section_title("📝", "REMOVED OBJECTS");
            println!(
                "      {} {}",
                style(self.removed.join(", ")),
                style(format!("({})", self.removed.len())).dim()
            );
        }
    }

    fn display_approximations(&self) {
        print_section_title("🎯", "APPROXIMATIONS");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Decision").add_attribute(Attribute::Bold),
            Cell::new("Lower").add_attribute(Attribute::Bold),
            Cell::new("Upper").add_attribute(Attribute::Bold),
            Cell::new("Boundary").add_attribute(Attribute::Bold),
            Cell::new("Accuracy").add_attribute(Attribute::Bold),
        ]);

        for approximation in &self.approximations {
            table.add_row(vec![
                Cell::new(&approximation.decision),
                Cell::new(approximation.lower.len()).set_alignment(CellAlignment::Right),
                Cell::new(approximation.upper.len()).set_alignment(CellAlignment::Right),
                Cell::new(approximation.boundary().len()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", approximation.accuracy))
                    .fg(accuracy_color(approximation.accuracy))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        print_indented(&table);
    }

    fn display_rules(&self) {
        print_section_title("📐", "STRONGEST RULES");

        let mut ranked: Vec<&Rule> = self.rules.iter().collect();
        ranked.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Condition").add_attribute(Attribute::Bold),
            Cell::new("Decision").add_attribute(Attribute::Bold),
            Cell::new("Support").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Weight").add_attribute(Attribute::Bold),
        ]);

        for rule in ranked.iter().take(MAX_RULES_SHOWN) {
            table.add_row(vec![
                Cell::new(rule.condition.to_string()),
                Cell::new(&rule.decision),
                Cell::new(format!("{:.3}", rule.support)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", rule.confidence)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", rule.weight)).set_alignment(CellAlignment::Right),
            ]);
        }

        print_indented(&table);

        if ranked.len() > MAX_RULES_SHOWN {
            println!(
                "      {}",
                style(format!(
                    "... and {} more (see the JSON report)",
                    ranked.len() - MAX_RULES_SHOWN
                ))
                .dim()
            );
        }
    }
}

fn accuracy_color(accuracy: f64) -> Color {
    if accuracy >= 0.8 {
        Color::Green
    } else if accuracy >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn print_section_title(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{analyze, AnalysisOptions, DecisionTable};

    fn example_table() -> DecisionTable {
        let rows = [["1", "x", "y", "P"], ["2", "x", "y", "P"], ["3", "x", "y", "Q"]];
        DecisionTable::new(
            vec!["id".into(), "A".into(), "B".into(), "dec".into()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_from_qualitative_report() {
        let report = analyze(Method::Qualitative, &example_table(), &AnalysisOptions::default());
        let summary = ReductionSummary::from_report(Method::Qualitative, &report);

        assert_eq!(summary.original_size, 3);
        assert_eq!(summary.consistent_size, 2);
        assert_eq!(summary.removed, vec!["2"]);
        assert_eq!(summary.approximations.len(), 2);
        assert!(summary.rules.is_empty());
        assert!((summary.reduction_pct() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_from_quantitative_report() {
        let report = analyze(Method::Quantitative, &example_table(), &AnalysisOptions::default());
        let summary = ReductionSummary::from_report(Method::Quantitative, &report);

        assert_eq!(summary.rules_count, Some(2));
        assert_eq!(summary.rules.len(), 2);
        assert!(summary.approximations.is_empty());
    }

    #[test]
    fn test_reduction_pct_empty_table() {
        let summary = ReductionSummary {
            method: Method::Qualitative,
            original_size: 0,
            consistent_size: 0,
            removed: Vec::new(),
            rules_count: None,
            approximations: Vec::new(),
            rules: Vec::new(),
        };
        assert_eq!(summary.reduction_pct(), 0.0);
    }
}

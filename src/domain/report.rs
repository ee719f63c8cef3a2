//! Rendered calculator results.

use std::fmt;

use super::formula::loan::AmortizationSchedule;
use super::formula::ratio::RatioOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Money(f64),
    Percent(f64),
    Ratio(RatioOutcome),
    /// A ratio already scaled to percent.
    PercentRatio(RatioOutcome),
    /// A ratio expressed as a money amount (e.g. a FIRE number).
    MoneyRatio(RatioOutcome),
    Number(f64),
    Count(u64),
    Months(u32),
    Years(u32),
    Text(String),
}

fn money(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v < 0.0 {
        write!(f, "-${:.2}", -v)
    } else {
        write!(f, "${:.2}", v)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Money(v) => money(f, *v),
            Figure::Percent(v) => write!(f, "{:.2}%", v),
            Figure::Ratio(r) => write!(f, "{}", r),
            Figure::PercentRatio(RatioOutcome::Value(v)) => write!(f, "{:.2}%", v),
            Figure::PercentRatio(r) => write!(f, "{}", r),
            Figure::MoneyRatio(RatioOutcome::Value(v)) => money(f, *v),
            Figure::MoneyRatio(r) => write!(f, "{}", r),
            Figure::Number(v) => write!(f, "{:.2}", v),
            Figure::Count(n) => write!(f, "{}", n),
            Figure::Months(n) => write!(f, "{} months", n),
            Figure::Years(n) => write!(f, "{} years", n),
            Figure::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label: String,
    pub value: Figure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub calculator: String,
    pub title: String,
    pub lines: Vec<ReportLine>,
    pub schedule: Option<AmortizationSchedule>,
}

impl CalculationReport {
    pub fn new(calculator: &str, title: &str) -> Self {
        CalculationReport {
            calculator: calculator.to_string(),
            title: title.to_string(),
            lines: Vec::new(),
            schedule: None,
        }
    }

    pub fn line(mut self, label: &str, value: Figure) -> Self {
        self.lines.push(ReportLine {
            label: label.to_string(),
            value,
        });
        self
    }

    pub fn get(&self, label: &str) -> Option<&Figure> {
        self.lines.iter().find(|l| l.label == label).map(|l| &l.value)
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        let width = self.lines.iter().map(|l| l.label.len()).max().unwrap_or(0);
        for line in &self.lines {
            writeln!(f, "{:<width$}  {}", format!("{}:", line.label), line.value, width = width + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_formatting() {
        assert_eq!(Figure::Money(1234.5).to_string(), "$1234.50");
        assert_eq!(Figure::Money(-20.0).to_string(), "-$20.00");
        assert_eq!(Figure::Percent(12.345).to_string(), "12.35%");
        assert_eq!(Figure::PercentRatio(RatioOutcome::Value(5.0)).to_string(), "5.00%");
        assert_eq!(Figure::PercentRatio(RatioOutcome::Infinite).to_string(), "infinite");
        assert_eq!(Figure::MoneyRatio(RatioOutcome::Value(1e6)).to_string(), "$1000000.00");
        assert_eq!(Figure::Months(7).to_string(), "7 months");
        assert_eq!(Figure::Count(3).to_string(), "3");
    }

    #[test]
    fn report_lines_align() {
        let report = CalculationReport::new("x", "Example")
            .line("Short", Figure::Count(1))
            .line("Much longer", Figure::Count(2));
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== Example ===");
        assert_eq!(lines[1], "Short:        1");
        assert_eq!(lines[2], "Much longer:  2");
        assert_eq!(report.get("Short"), Some(&Figure::Count(1)));
    }
}

use crate::theory::TheoryNode;

pub fn format_fixed(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_exponential(value: f64) -> String {
    let formatted = format!("{value:.2e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

pub fn format_cqc(cqc: f64) -> String {
    if cqc > 1000.0 {
        format_exponential(cqc)
    } else {
        format_fixed(cqc)
    }
}

fn bar_fraction(percent: f64) -> f32 {
    (percent.min(100.0) / 100.0).max(0.0) as f32
}

pub fn quantum_fidelity_bar(quantum_fidelity: f64) -> f32 {
    bar_fraction(quantum_fidelity * 2.0)
}

pub fn stability_bar(stability: f64) -> f32 {
    bar_fraction(stability * 100.0)
}

pub fn entropy_bar(entropy: f64) -> f32 {
    bar_fraction(entropy * 40.0)
}

pub fn cqc_bar(cqc: f64) -> f32 {
    bar_fraction(cqc.max(1.0).log10() * 20.0)
}

pub fn relationship_text(node: &TheoryNode) -> &'static str {
    if node.is_topology {
        "This is a pure topology problem with significant fractal resonance properties."
    } else if node.is_topology_related {
        "This problem has strong connections to topological mathematics."
    } else {
        "This problem may have indirect connections to topology through quantum-fractal properties."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::TheoryRow;

    #[test]
    fn cqc_switches_to_exponent_above_thousand() {
        assert_eq!(format_cqc(1000.0), "1000.00");
        assert_eq!(format_cqc(12345.0), "1.23e+4");
        assert_eq!(format_cqc(3.14159), "3.14");
        assert_eq!(format_exponential(0.000123), "1.23e-4");
    }

    #[test]
    fn bars_are_clamped_percentages() {
        assert_eq!(quantum_fidelity_bar(25.0), 0.5);
        assert_eq!(quantum_fidelity_bar(80.0), 1.0);
        assert_eq!(stability_bar(0.25), 0.25);
        assert_eq!(entropy_bar(1.0), 0.4);
        assert_eq!(entropy_bar(-2.0), 0.0);
        assert_eq!(cqc_bar(0.5), 0.0);
        assert!((cqc_bar(1000.0) - 0.6).abs() < 1e-6);
        assert_eq!(cqc_bar(1e9), 1.0);
    }

    #[test]
    fn relationship_follows_flags() {
        let node = |category: &str| {
            TheoryNode::from_row(&TheoryRow {
                category: category.to_owned(),
                ..TheoryRow::default()
            })
        };
        assert!(relationship_text(&node("Topology")).contains("pure topology"));
        assert!(relationship_text(&node("Knot Theory")).contains("strong connections"));
        assert!(relationship_text(&node("Algebra")).contains("indirect"));
    }
}

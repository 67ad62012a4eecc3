//! ASCII rendering of chart specs.
//!
//! This is intentionally "dumb" (fixed-size row), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Row elements:
//! - band tones: `#` danger, `~` caution, `.` good
//! - threshold marker: `|`
//! - value marker: `O` (drawn last, wins over the threshold)
//!
//! An angular gauge flattens to the same linear bar as a bullet here; the
//! spec's shape only matters to richer renderers.

use crate::domain::{BandTone, ChartSpec};

/// Render one chart spec as a three-line block.
pub fn render_chart(spec: &ChartSpec, width: usize) -> String {
    let width = width.max(10);
    let span = spec.axis_max - spec.axis_min;

    let mut row: Vec<char> = (0..width)
        .map(|i| {
            let v = spec.axis_min + (i as f64 / (width as f64 - 1.0)) * span;
            tone_char(spec.tone_at(v))
        })
        .collect();

    row[map_x(spec.position(spec.threshold), width)] = '|';
    row[map_x(spec.position(spec.value), width)] = 'O';

    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", spec.title, spec.value_text()));
    out.push_str(&row.into_iter().collect::<String>());
    out.push('\n');
    out.push_str(&axis_row(spec, width));
    out.push('\n');
    out
}

fn tone_char(tone: Option<BandTone>) -> char {
    match tone {
        Some(BandTone::Good) => '.',
        Some(BandTone::Caution) => '~',
        Some(BandTone::Danger) => '#',
        None => ' ',
    }
}

fn map_x(position: f64, width: usize) -> usize {
    (position * (width as f64 - 1.0)).round() as usize
}

fn axis_row(spec: &ChartSpec, width: usize) -> String {
    let left = format!("{:.0}", spec.axis_min);
    let right = format!("{:.0}", spec.axis_max);
    let gap = width.saturating_sub(left.len() + right.len());
    format!("{left}{}{right}", " ".repeat(gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{credit_gauge_spec, dti_bullet_spec};

    #[test]
    fn gauge_golden_snapshot_small() {
        let spec = credit_gauge_spec(680.0);
        let txt = render_chart(&spec, 40);
        let expected = concat!(
            "FICO Score: 680.0\n",
            "#####################|~~~~~O~~~~........\n",
            "300                                  850\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bullet_value_text_carries_suffix() {
        let spec = dti_bullet_spec(0.35);
        let txt = render_chart(&spec, 40);
        assert!(txt.starts_with("Debt Load (DTI): 35.0%\n"));
    }

    #[test]
    fn out_of_range_value_clamps_to_the_edge() {
        // A DTI above 100% still renders inside the row.
        let spec = dti_bullet_spec(1.8);
        let txt = render_chart(&spec, 40);
        let row = txt.lines().nth(1).unwrap();
        assert_eq!(row.chars().count(), 40);
        assert_eq!(row.chars().last().unwrap(), 'O');
    }
}

//! What the progress indicator shows in each state.
//!
//! The indicator is a 100x100 ring: a light track with a progress stroke whose dash offset
//! shrinks as progress grows, and a percentage in the middle. Once complete it is replaced by a
//! green circle with a checkmark.

use std::f64::consts::PI;
use std::fmt::Write as _;

/// Radius of the progress ring in view-box units.
pub const RING_RADIUS: f64 = 45.0;

const TRACK_STROKE: &str = "#e0e7ff";
const PROGRESS_STROKE: &str = "#3b82f6";
const SUCCESS_STROKE: &str = "#10b981";

/// Dash parameters for drawing `progress` percent of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArc {
    pub circumference: f64,
    pub dash_offset: f64,
}

impl ProgressArc {
    pub fn for_progress(progress: f64) -> Self {
        let circumference = 2.0 * PI * RING_RADIUS;
        let fraction = (progress / 100.0).clamp(0.0, 1.0);
        Self {
            circumference,
            dash_offset: circumference * (1.0 - fraction),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressView {
    Running { percent: u8, arc: ProgressArc },
    Complete,
}

impl ProgressView {
    pub fn running(progress: f64) -> Self {
        let clamped = progress.clamp(0.0, 100.0);
        Self::Running {
            percent: clamped.round() as u8,
            arc: ProgressArc::for_progress(clamped),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Rounded percentage while running.
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Running { percent, .. } => Some(*percent),
            Self::Complete => None,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::Running { .. } => "Analisando dados...",
            Self::Complete => "Dados validados!",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Self::Running { .. } => "Por favor, aguarde enquanto processamos suas informações",
            Self::Complete => "Suas informações foram processadas com sucesso",
        }
    }

    /// SVG markup for the indicator.
    pub fn render_svg(&self) -> String {
        let mut svg = String::from(
            r#"<svg viewBox="0 0 100 100" width="96" height="96" xmlns="http://www.w3.org/2000/svg">"#,
        );
        svg.push('\n');

        // Writing into a String cannot fail.
        match self {
            Self::Running { percent, arc } => {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="50" cy="50" r="{RING_RADIUS}" fill="none" stroke="{TRACK_STROKE}" stroke-width="4"/>"#
                );
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="50" cy="50" r="{RING_RADIUS}" fill="none" stroke="{PROGRESS_STROKE}" stroke-width="4" stroke-dasharray="{:.3}" stroke-dashoffset="{:.3}" stroke-linecap="round" transform="rotate(-90 50 50)"/>"#,
                    arc.circumference, arc.dash_offset
                );
                let _ = writeln!(
                    svg,
                    r#"  <text x="50" y="50" text-anchor="middle" dominant-baseline="central" font-size="24" font-weight="bold" fill="{PROGRESS_STROKE}">{percent}%</text>"#
                );
            }
            Self::Complete => {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="50" cy="50" r="{RING_RADIUS}" fill="none" stroke="{SUCCESS_STROKE}" stroke-width="4"/>"#
                );
                let _ = writeln!(
                    svg,
                    r#"  <path d="M 30 50 L 45 65 L 70 35" fill="none" stroke="{SUCCESS_STROKE}" stroke-width="4" stroke-linecap="round" stroke-linejoin="round"/>"#
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

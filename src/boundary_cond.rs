use serde::{Deserialize, Serialize};

// Right-end boundary condition of the groundwater domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum RightBoundary {
    Flux(f64), // Neumann: prescribed flux qL
    Head(f64), // Dirichlet: fixed head hL
}

// Boundary condition parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryParams {
    pub q0: f64,              // Flux at x = 0
    pub right: RightBoundary, // Condition at x = L
}

impl BoundaryParams {
    pub fn flux(q0: f64, ql: f64) -> Self {
        BoundaryParams {
            q0,
            right: RightBoundary::Flux(ql),
        }
    }

    pub fn flux_and_head(q0: f64, hl: f64) -> Self {
        BoundaryParams {
            q0,
            right: RightBoundary::Head(hl),
        }
    }

    // Both ends prescribe flux only, so heads are fixed up to a constant
    pub(crate) fn is_pure_neumann(&self) -> bool {
        matches!(self.right, RightBoundary::Flux(_))
    }
}

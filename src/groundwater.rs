use crate::boundary_cond::{BoundaryParams, RightBoundary};
use crate::error::{HydroError, Result};
use crate::linear_solver::LinearSystem;
use crate::matrix::{matrix, vector};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Aquifer and discretisation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AquiferParams {
    pub length: f64, // Domain length
    pub k: f64,      // Hydraulic conductivity
    pub nodes: usize,
    pub w0: f64, // Source term at x = 0
    pub w1: f64, // Source gradient along x
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundwaterSolution {
    pub x: DVector<f64>,
    pub head: DVector<f64>,
    pub discharge: DVector<f64>,
}

// Steady 1-D flow, -k h'' = w0 + w1 x, discretised with central differences
pub struct GroundwaterSolver {
    aquifer: AquiferParams,
    bc: BoundaryParams,
    dx: f64,
}

impl GroundwaterSolver {
    pub fn new(aquifer: AquiferParams, bc: BoundaryParams) -> Result<Self> {
        if aquifer.nodes < 3 {
            return Err(HydroError::invalid("nodes", aquifer.nodes, "at least 3 nodes"));
        }
        if !(aquifer.length > 0.0) {
            return Err(HydroError::invalid("length", aquifer.length, "must be positive"));
        }
        if !(aquifer.k > 0.0) {
            return Err(HydroError::invalid("k", aquifer.k, "must be positive"));
        }
        let dx = aquifer.length / (aquifer.nodes - 1) as f64;
        Ok(GroundwaterSolver { aquifer, bc, dx })
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    // Assemble the finite difference system
    pub fn assemble(&self) -> Result<LinearSystem> {
        let n = self.aquifer.nodes;
        let k = self.aquifer.k;
        let dx = self.dx;
        let factor = k / dx;
        let inner = k / dx.powi(2);

        let mut a = matrix(n, n, 0.0);
        let mut b = vector(n, 0.0);

        for i in 0..n {
            if i == 0 {
                // Flux boundary at x = 0
                a[(i, i)] = factor;
                a[(i, i + 1)] = -factor;
                b[i] = self.bc.q0;
            } else if i == n - 1 {
                match self.bc.right {
                    RightBoundary::Flux(ql) => {
                        a[(i, i)] = -factor;
                        a[(i, i - 1)] = factor;
                        b[i] = ql;
                    }
                    RightBoundary::Head(hl) => {
                        a[(i, i)] = 1.0;
                        b[i] = hl;
                    }
                }
            } else {
                a[(i, i - 1)] = -inner;
                a[(i, i)] = 2.0 * inner;
                a[(i, i + 1)] = -inner;
                b[i] = self.aquifer.w0 + self.aquifer.w1 * i as f64 * dx;
            }
        }
        LinearSystem::new(a, b)
    }

    pub fn solve(&self) -> Result<GroundwaterSolution> {
        if self.bc.is_pure_neumann() {
            warn!("flux prescribed at both ends, head is only determined up to a constant");
        }
        debug!(nodes = self.aquifer.nodes, dx = self.dx, "solving steady groundwater flow");
        let head = self.assemble()?.solve()?;
        let discharge = self.discharge(&head);
        let x = DVector::from_fn(head.len(), |i, _| i as f64 * self.dx);
        Ok(GroundwaterSolution { x, head, discharge })
    }

    // Darcy discharge, one-sided at the ends and centred inside
    pub fn discharge(&self, head: &DVector<f64>) -> DVector<f64> {
        let n = head.len();
        let k = self.aquifer.k;
        let dx = self.dx;
        let mut q = vector(n, 0.0);
        q[0] = -k * (head[1] - head[0]) / dx;
        for i in 1..n - 1 {
            q[i] = -k * (head[i + 1] - head[i - 1]) / (2.0 * dx);
        }
        q[n - 1] = -k * (head[n - 1] - head[n - 2]) / dx;
        q
    }
}

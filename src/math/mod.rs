//! Mathematical utilities for 2D frame calculations

use nalgebra::{DMatrix, DVector, Matrix4, Matrix6, Vector6};

use crate::elements::ElementKind;
use crate::error::{FrameError, FrameResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for truss stiffness [u1, v1, u2, v2]
pub type Mat4 = Matrix4<f64>;
/// 6x6 matrix for element stiffness/transformation [u1, v1, θ1, u2, v2, θ2]
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element end forces/displacements
pub type Vec6 = Vector6<f64>;

/// Positions of the truss DOFs [u1, v1, u2, v2] inside a 6-DOF element
pub const TRUSS_DOF_SLOTS: [usize; 4] = [0, 1, 3, 4];

/// Shortest element accepted as non-degenerate
pub const MIN_ELEMENT_LENGTH: f64 = 1e-12;

/// Length and orientation of an element from its end coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    pub dx: f64,
    pub dy: f64,
    pub length: f64,
    /// cos of the angle between local x and global X
    pub c: f64,
    /// sin of the angle between local x and global X
    pub s: f64,
}

/// Compute element length and direction cosines
///
/// # Arguments
/// * `i_node` - Start node coordinates [X, Y]
/// * `j_node` - End node coordinates [X, Y]
pub fn element_geometry(i_node: &[f64; 2], j_node: &[f64; 2]) -> FrameResult<ElementGeometry> {
    let dx = j_node[0] - i_node[0];
    let dy = j_node[1] - i_node[1];
    let length = dx.hypot(dy);

    if !length.is_finite() || length < MIN_ELEMENT_LENGTH {
        return Err(FrameError::InvalidGeometry(format!(
            "element has zero length between ({}, {}) and ({}, {})",
            i_node[0], i_node[1], j_node[0], j_node[1]
        )));
    }

    Ok(ElementGeometry {
        dx,
        dy,
        length,
        c: dx / length,
        s: dy / length,
    })
}

/// Compute the transformation matrix for a 2D frame element
///
/// Maps global DOFs to local DOFs: `d_local = T * d_global`. Rotations are
/// about the out-of-plane axis and pass through unchanged.
pub fn transformation_matrix(c: f64, s: f64) -> Mat6 {
    let mut t = Mat6::zeros();

    for offset in [0, 3] {
        t[(offset, offset)] = c;
        t[(offset, offset + 1)] = s;
        t[(offset + 1, offset)] = -s;
        t[(offset + 1, offset + 1)] = c;
        t[(offset + 2, offset + 2)] = 1.0;
    }

    t
}

/// Local stiffness matrix of a two-node axial bar, DOFs [u1, v1, u2, v2]
pub fn truss_local_stiffness(e: f64, a: f64, length: f64) -> Mat4 {
    let ea_l = e * a / length;

    #[rustfmt::skip]
    let data = [
         ea_l, 0.0, -ea_l, 0.0,
         0.0,  0.0,  0.0,  0.0,
        -ea_l, 0.0,  ea_l, 0.0,
         0.0,  0.0,  0.0,  0.0,
    ];

    Mat4::from_row_slice(&data)
}

/// Compute the local stiffness matrix for a 2D Euler-Bernoulli beam-column
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Second moment of area
/// * `length` - Member length
///
/// # Returns
/// 6x6 local stiffness matrix, DOFs [u1, v1, θ1, u2, v2, θ2]
pub fn beam_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let ea_l = e * a / l;
    let ei_l3 = e * i / (l * l * l);
    let ei_l2 = e * i / (l * l);
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
         ea_l,  0.0,          0.0,          -ea_l, 0.0,          0.0,
        // Row 1: shear at i
         0.0,   12.0*ei_l3,   6.0*ei_l2,    0.0,   -12.0*ei_l3,  6.0*ei_l2,
        // Row 2: moment at i
         0.0,   6.0*ei_l2,    4.0*ei_l,     0.0,   -6.0*ei_l2,   2.0*ei_l,
        // Row 3: axial at j
        -ea_l,  0.0,          0.0,           ea_l, 0.0,          0.0,
        // Row 4: shear at j
         0.0,   -12.0*ei_l3,  -6.0*ei_l2,   0.0,   12.0*ei_l3,   -6.0*ei_l2,
        // Row 5: moment at j
         0.0,   6.0*ei_l2,    2.0*ei_l,     0.0,   -6.0*ei_l2,   4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Place a 4x4 truss matrix at the translational slots of a 6x6 matrix
pub fn embed_truss(k4: &Mat4) -> Mat6 {
    let mut k6 = Mat6::zeros();
    for (i, &r) in TRUSS_DOF_SLOTS.iter().enumerate() {
        for (j, &c) in TRUSS_DOF_SLOTS.iter().enumerate() {
            k6[(r, c)] = k4[(i, j)];
        }
    }
    k6
}

/// 6x6 local stiffness for an element of the given effective kind
pub fn local_stiffness(kind: ElementKind, e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    match kind {
        ElementKind::Truss => embed_truss(&truss_local_stiffness(e, a, length)),
        ElementKind::Beam => beam_local_stiffness(e, a, i, length),
    }
}

/// Transform a local element matrix to global axes: K = T^T * k * T
pub fn to_global(k_local: &Mat6, t: &Mat6) -> Mat6 {
    t.transpose() * k_local * t
}

/// 2-norm condition number (ratio of extreme singular values).
///
/// Infinite for a matrix with a zero singular value; 1.0 for an empty matrix.
pub fn condition_number(a: &Mat) -> f64 {
    if a.nrows() == 0 || a.ncols() == 0 {
        return 1.0;
    }

    let sv = a.clone().svd(false, false).singular_values;
    let max = sv.iter().copied().fold(0.0_f64, f64::max);
    let min = sv.iter().copied().fold(f64::INFINITY, f64::min);

    if !max.is_finite() || !min.is_finite() {
        return f64::INFINITY;
    }
    if min <= 0.0 {
        return f64::INFINITY;
    }
    max / min
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone()
        .lu()
        .solve(b)
        .filter(|x| x.iter().all(|v| v.is_finite()))
}

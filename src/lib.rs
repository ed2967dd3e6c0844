//! Serial robot arms from Denavit-Hartenberg parameters.
//!
//! An ordered list of [`DhParameter`]s becomes a [`Chain`]: a `Base` link
//! followed by one link per parameter set, each posed relative to its parent
//! and connected to it by a revolute joint. A [`HostAdapter`] turns the chain
//! into bodies and joints of an external CAD or physics host.
//!
//! ```
//! use robot_dh::{Chain, DhTable};
//!
//! let chain = Chain::from_dh(&DhTable::reference_arm().parameters()).unwrap();
//! assert_eq!(chain.link_count(), 6);
//! assert_eq!(chain.joint_count(), 5);
//! ```

use hashbrown::HashMap;
use nalgebra::{Point3, Unit, Vector3};
use petgraph::prelude::*;

mod adapter;
mod bfs;
mod chain;
mod config;
mod error;
mod params;
mod pose;
mod units;
mod utils;

pub use adapter::{
    materialize, HostAdapter, Instruction, MaterializeError, Materialized, RecordingAdapter,
};
pub use chain::build_chain;
pub use config::{DhConfig, LinkEntry};
pub use error::DhError;
pub use params::{DhField, DhParameter, DhRow, DhTable};
pub use pose::{compose, compose_at, rot_x, rot_z, to_homogeneous, trans_x, trans_z, RigidTransform};
pub use units::{AngleUnit, LengthUnit};

/// Position of a link in [`Chain::links`]. The base link is always `0`.
pub type LinkId = usize;

pub const BASE: LinkId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    /// One rotational degree of freedom about the joint axis.
    Revolute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub parent: LinkId,
    pub child: LinkId,
    pub kind: JointKind,
    // rotation axis, in the child frame
    pub axis: Unit<Vector3<f64>>,
    // anchor point, in the parent frame
    pub anchor: Point3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub name: String,

    // parameters this link was built from, none for the base
    pub dh: Option<DhParameter>,

    pub parent: Option<LinkId>,

    // zero pose relative to parent link
    pub parent_zero_pose: RigidTransform,

    // zero pose relative to the base
    pub global_zero_pose: RigidTransform,
}

#[derive(Debug, Clone)]
pub struct Chain {
    links: Vec<Link>,
    joints: Vec<Joint>,
    link_graph: DiGraphMap<LinkId, ()>,
    bfs: Vec<LinkId>,
    names: HashMap<String, LinkId>,
}

use hashbrown::HashMap;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use tracing::{debug, info, warn};

use super::bfs::bfs;
use super::error::DhError;
use super::params::DhParameter;
use super::pose::{compose_at, RigidTransform};
use super::utils::*;
use super::{Chain, Joint, Link, LinkId, BASE};

/// Builds the link chain for `dh_list`, taken in the given order.
///
/// The result has one link per parameter set plus the `Base` link, and one
/// revolute joint per parameter set. An empty list yields the base link alone.
///
/// # Errors
///
/// Fails at the first parameter set with a non-finite field, a zero index or
/// an index not greater than the one before it.
pub fn build_chain(dh_list: &[DhParameter]) -> Result<Chain, DhError> {
    if dh_list.is_empty() {
        warn!("empty DH parameter list, chain has only the base link");
    }

    let mut links = Vec::with_capacity(dh_list.len() + 1);
    let mut joints = Vec::with_capacity(dh_list.len());
    links.push(base_link());

    let mut parent = BASE;
    let mut previous = None;
    for dh in dh_list {
        dh.validate()?;
        check_order(dh, previous)?;

        let child = links.len();
        let link = dh_link(dh, parent);
        debug!(
            link = %link.name,
            parent = %links[parent].name,
            a = dh.a,
            alpha = dh.alpha,
            d = dh.d,
            theta = dh.theta,
            "adding link"
        );
        links.push(link);
        joints.push(revolute_joint(dh, parent, child));

        parent = child;
        previous = Some(dh.index);
    }

    // link id -> link id
    let link_graph = construct_link_graph(&links);
    let bfs = bfs(&link_graph, BASE);

    fill_global_poses(&mut links, &link_graph, &bfs);

    let names = links
        .iter()
        .enumerate()
        .map(|(id, l)| (l.name.clone(), id))
        .collect::<HashMap<_, _>>();

    info!(links = links.len(), joints = joints.len(), "built DH chain");

    Ok(Chain {
        links,
        joints,
        link_graph,
        bfs,
        names,
    })
}

impl Chain {
    pub fn from_dh(dh_list: &[DhParameter]) -> Result<Self, DhError> {
        build_chain(dh_list)
    }

    /// The `Base` link.
    pub fn root(&self) -> &Link {
        &self.links[BASE]
    }

    /// Last link of the chain; the base when the chain has no DH links.
    pub fn end_effector(&self) -> &Link {
        // never empty: the base is always present
        &self.links[self.links.len() - 1]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn link_id(&self, name: &str) -> Option<LinkId> {
        self.names.get(name).copied()
    }

    pub fn link_by_name(&self, name: &str) -> Option<&Link> {
        self.link_id(name).map(|id| &self.links[id])
    }

    pub fn parent_of(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)?.parent.map(|p| &self.links[p])
    }

    pub fn children_of(&self, id: LinkId) -> Vec<LinkId> {
        if !self.link_graph.contains_node(id) {
            return Vec::new();
        }
        self.link_graph
            .neighbors_directed(id, Direction::Outgoing)
            .collect()
    }

    /// Joint whose child is link `id`.
    pub fn joint_to(&self, id: LinkId) -> Option<&Joint> {
        self.joints.iter().find(|j| j.child == id)
    }

    pub fn link_graph(&self) -> &DiGraphMap<LinkId, ()> {
        &self.link_graph
    }

    /// Link ids with every parent before its children.
    pub fn traversal(&self) -> &[LinkId] {
        &self.bfs
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Global pose of every link with `joint_values[i]` added to the nominal
    /// angle of joint `i`. Index `0` of the result is the base.
    pub fn forward_kinematics(&self, joint_values: &[f64]) -> Result<Vec<RigidTransform>, DhError> {
        if joint_values.len() != self.joints.len() {
            return Err(DhError::JointCountMismatch {
                expected: self.joints.len(),
                actual: joint_values.len(),
            });
        }
        if let Some((position, &value)) = joint_values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(DhError::InvalidJointValue { position, value });
        }

        let mut q = vec![0.; self.links.len()];
        self.joints
            .iter()
            .zip(joint_values)
            .for_each(|(j, v)| q[j.child] = *v);

        Ok(global_poses(
            &self.links,
            &self.link_graph,
            &self.bfs,
            |id, link| match &link.dh {
                Some(dh) => compose_at(dh, q[id]),
                None => link.parent_zero_pose,
            },
        ))
    }
}

use nalgebra::{Point3, Vector3};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use super::error::DhError;
use super::params::DhParameter;
use super::pose::{compose, RigidTransform};
use super::{Joint, JointKind, Link, LinkId};

pub(super) fn base_link() -> Link {
    Link {
        name: "Base".to_string(),
        dh: None,
        parent: None,
        parent_zero_pose: RigidTransform::identity(),
        global_zero_pose: RigidTransform::identity(),
    }
}

pub(super) fn dh_link(dh: &DhParameter, parent: LinkId) -> Link {
    Link {
        name: dh.link_name(),
        dh: Some(*dh),
        parent: Some(parent),
        parent_zero_pose: compose(dh),
        // filled once the whole chain is known
        global_zero_pose: RigidTransform::identity(),
    }
}

// revolute about the child's Z axis, anchored at the parent's origin
pub(super) fn revolute_joint(dh: &DhParameter, parent: LinkId, child: LinkId) -> Joint {
    Joint {
        name: format!("Joint_{}", dh.index),
        parent,
        child,
        kind: JointKind::Revolute,
        axis: Vector3::z_axis(),
        anchor: Point3::origin(),
    }
}

// indices must be strictly increasing
pub(super) fn check_order(dh: &DhParameter, previous: Option<u32>) -> Result<(), DhError> {
    match previous {
        Some(previous) if dh.index == previous => Err(DhError::DuplicateIndex { index: dh.index }),
        Some(previous) if dh.index < previous => Err(DhError::OutOfOrder {
            index: dh.index,
            previous,
        }),
        _ => Ok(()),
    }
}

pub(super) fn construct_link_graph(links: &[Link]) -> DiGraphMap<LinkId, ()> {
    let mut graph = DiGraphMap::<LinkId, ()>::new();

    (0..links.len()).for_each(|id| {
        graph.add_node(id);
    });

    links.iter().enumerate().for_each(|(id, link)| {
        if let Some(parent) = link.parent {
            graph.add_edge(parent, id, ());
        }
    });

    graph
}

fn parent_in_graph(graph: &DiGraphMap<LinkId, ()>, link: LinkId) -> Option<LinkId> {
    graph.neighbors_directed(link, Direction::Incoming).next()
}

// global pose of every link, given each link's pose relative to its parent
// bfs must list parents before children
pub(super) fn global_poses<F>(
    links: &[Link],
    graph: &DiGraphMap<LinkId, ()>,
    bfs: &[LinkId],
    relative: F,
) -> Vec<RigidTransform>
where
    F: Fn(LinkId, &Link) -> RigidTransform,
{
    let mut poses = vec![RigidTransform::identity(); links.len()];
    for &link in bfs {
        let local = relative(link, &links[link]);
        poses[link] = match parent_in_graph(graph, link) {
            Some(parent) => poses[parent] * local,
            None => local,
        };
    }
    poses
}

pub(super) fn fill_global_poses(
    links: &mut [Link],
    graph: &DiGraphMap<LinkId, ()>,
    bfs: &[LinkId],
) {
    let poses = global_poses(links, graph, bfs, |_, l| l.parent_zero_pose);
    links
        .iter_mut()
        .zip(poses)
        .for_each(|(link, pose)| link.global_zero_pose = pose);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::bfs::bfs;

    fn two_link_chain() -> Vec<Link> {
        let first = DhParameter::new(1, 0.5, 0., 0., 0.);
        let second = DhParameter::new(2, 0.25, 0., 0., 0.);
        vec![base_link(), dh_link(&first, 0), dh_link(&second, 1)]
    }

    #[test]
    fn check_order_test() {
        let dh = DhParameter::new(3, 0., 0., 0., 0.);
        assert!(check_order(&dh, None).is_ok());
        assert!(check_order(&dh, Some(1)).is_ok());
        assert!(matches!(
            check_order(&dh, Some(3)),
            Err(DhError::DuplicateIndex { index: 3 })
        ));
        assert!(matches!(
            check_order(&dh, Some(5)),
            Err(DhError::OutOfOrder {
                index: 3,
                previous: 5
            })
        ));
    }

    #[test]
    fn construct_link_graph_test() {
        let graph = construct_link_graph(&two_link_chain());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(0, 1));
        assert!(graph.contains_edge(1, 2));
        assert_eq!(parent_in_graph(&graph, 0), None);
        assert_eq!(parent_in_graph(&graph, 2), Some(1));
    }

    #[test]
    fn fill_global_poses_test() {
        let mut links = two_link_chain();
        let graph = construct_link_graph(&links);
        fill_global_poses(&mut links, &graph, &bfs(&graph, 0));
        assert_eq!(links[0].global_zero_pose, RigidTransform::identity());
        assert_relative_eq!(
            links[2].global_zero_pose.translation.vector,
            Vector3::new(0.75, 0., 0.),
            epsilon = 1e-12
        );
    }

    #[test]
    fn revolute_joint_test() {
        let joint = revolute_joint(&DhParameter::new(4, 0., 0., 0., 0.), 3, 4);
        assert_eq!(joint.name, "Joint_4");
        assert_eq!(joint.kind, JointKind::Revolute);
        assert_eq!(joint.axis.into_inner(), Vector3::z());
        assert_eq!(joint.anchor, Point3::origin());
    }
}

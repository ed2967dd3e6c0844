//! Handing a [`Chain`] to a host that owns the real bodies and joints.
//!
//! The chain itself never touches a host API. It is flattened into a list of
//! [`Instruction`]s, which [`materialize`] replays against a [`HostAdapter`].
//! Lengths are converted from meters to the adapter's unit here and nowhere
//! else.

use hashbrown::HashMap;
use nalgebra::{Point3, Translation3, Unit, Vector3};
use tracing::debug;

use crate::pose::RigidTransform;
use crate::units::LengthUnit;
use crate::{Chain, JointKind, LinkId};

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Create a body posed by `transform` relative to `parent` (grounded when `None`).
    CreateLink {
        link: LinkId,
        name: String,
        parent: Option<LinkId>,
        transform: RigidTransform,
    },
    /// Constrain `child` to `parent`. `axis` is in the child frame, `anchor` in the parent frame.
    CreateJoint {
        name: String,
        parent: LinkId,
        child: LinkId,
        kind: JointKind,
        axis: Unit<Vector3<f64>>,
        anchor: Point3<f64>,
    },
}

pub trait HostAdapter {
    type Handle;
    type Error: std::error::Error + 'static;

    /// Length unit the host works in.
    fn length_unit(&self) -> LengthUnit {
        LengthUnit::Meter
    }

    fn create_link(
        &mut self,
        name: &str,
        parent: Option<&Self::Handle>,
        transform: &RigidTransform,
    ) -> Result<Self::Handle, Self::Error>;

    fn create_joint(
        &mut self,
        name: &str,
        kind: JointKind,
        parent: &Self::Handle,
        child: &Self::Handle,
        axis: &Unit<Vector3<f64>>,
        anchor: &Point3<f64>,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum MaterializeError<E: std::error::Error + 'static> {
    #[error("host failed to create link `{name}`: {source}")]
    Link { name: String, source: E },

    #[error("host failed to create joint `{name}`: {source}")]
    Joint { name: String, source: E },
}

/// Handles of the bodies a host created for a chain.
#[derive(Debug)]
pub struct Materialized<H> {
    links: HashMap<LinkId, H>,
    joints: usize,
}

impl<H> Materialized<H> {
    pub fn handle(&self, link: LinkId) -> Option<&H> {
        self.links.get(&link)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints
    }
}

fn scaled(transform: &RigidTransform, scale: f64) -> RigidTransform {
    RigidTransform::from_parts(
        Translation3::from(transform.translation.vector * scale),
        transform.rotation,
    )
}

impl Chain {
    /// Link and joint creation steps in build order, lengths in `unit`.
    pub fn instructions(&self, unit: LengthUnit) -> Vec<Instruction> {
        let scale = unit.convert_meters(1.0);
        let mut out = Vec::with_capacity(self.link_count() + self.joint_count());
        for &id in self.traversal() {
            let link = &self.links()[id];
            out.push(Instruction::CreateLink {
                link: id,
                name: link.name.clone(),
                parent: link.parent,
                transform: scaled(&link.parent_zero_pose, scale),
            });
            if let Some(joint) = self.joint_to(id) {
                out.push(Instruction::CreateJoint {
                    name: joint.name.clone(),
                    parent: joint.parent,
                    child: joint.child,
                    kind: joint.kind,
                    axis: joint.axis,
                    anchor: joint.anchor * scale,
                });
            }
        }
        out
    }
}

/// Creates every link and joint of `chain` through `adapter`.
///
/// Stops at the first host failure. The chain is never modified; whatever the
/// host already created is left to the adapter to clean up.
pub fn materialize<A: HostAdapter>(
    chain: &Chain,
    adapter: &mut A,
) -> Result<Materialized<A::Handle>, MaterializeError<A::Error>> {
    let unit = adapter.length_unit();
    let mut done = Materialized {
        links: HashMap::with_capacity(chain.link_count()),
        joints: 0,
    };

    for instruction in chain.instructions(unit) {
        match instruction {
            Instruction::CreateLink {
                link,
                name,
                parent,
                transform,
            } => {
                debug!(link = %name, ?unit, "creating host link");
                let parent = parent.and_then(|p| done.links.get(&p));
                let handle = adapter
                    .create_link(&name, parent, &transform)
                    .map_err(|source| MaterializeError::Link { name, source })?;
                done.links.insert(link, handle);
            }
            Instruction::CreateJoint {
                name,
                parent,
                child,
                kind,
                axis,
                anchor,
            } => {
                // both ends were created by earlier instructions
                let (Some(p), Some(c)) = (done.links.get(&parent), done.links.get(&child)) else {
                    continue;
                };
                debug!(joint = %name, "creating host joint");
                adapter
                    .create_joint(&name, kind, p, c, &axis, &anchor)
                    .map_err(|source| MaterializeError::Joint { name, source })?;
                done.joints += 1;
            }
        }
    }

    Ok(done)
}

/// Adapter that only records what it was asked to create.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub unit: LengthUnit,
    pub log: Vec<String>,
    pub transforms: Vec<RigidTransform>,
}

impl RecordingAdapter {
    pub fn new(unit: LengthUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }
}

impl HostAdapter for RecordingAdapter {
    type Handle = String;
    type Error = std::convert::Infallible;

    fn length_unit(&self) -> LengthUnit {
        self.unit
    }

    fn create_link(
        &mut self,
        name: &str,
        parent: Option<&String>,
        transform: &RigidTransform,
    ) -> Result<String, Self::Error> {
        match parent {
            Some(p) => self.log.push(format!("link {name} under {p}")),
            None => self.log.push(format!("link {name} grounded")),
        }
        self.transforms.push(*transform);
        Ok(name.to_string())
    }

    fn create_joint(
        &mut self,
        name: &str,
        kind: JointKind,
        parent: &String,
        child: &String,
        _axis: &Unit<Vector3<f64>>,
        _anchor: &Point3<f64>,
    ) -> Result<(), Self::Error> {
        self.log
            .push(format!("{kind:?} joint {name} {parent} -> {child}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::params::DhTable;

    #[derive(Debug, thiserror::Error)]
    #[error("host refused {0}")]
    struct Refused(String);

    // fails when asked to create the named link or joint
    struct FailingAdapter {
        fail_on: &'static str,
        created: usize,
    }

    impl HostAdapter for FailingAdapter {
        type Handle = usize;
        type Error = Refused;

        fn create_link(
            &mut self,
            name: &str,
            _parent: Option<&usize>,
            _transform: &RigidTransform,
        ) -> Result<usize, Refused> {
            if name == self.fail_on {
                return Err(Refused(name.to_string()));
            }
            self.created += 1;
            Ok(self.created)
        }

        fn create_joint(
            &mut self,
            name: &str,
            _kind: JointKind,
            _parent: &usize,
            _child: &usize,
            _axis: &Unit<Vector3<f64>>,
            _anchor: &Point3<f64>,
        ) -> Result<(), Refused> {
            if name == self.fail_on {
                return Err(Refused(name.to_string()));
            }
            Ok(())
        }
    }

    fn reference_chain() -> Chain {
        Chain::from_dh(&DhTable::reference_arm().parameters()).unwrap()
    }

    #[test]
    fn instructions_order_test() {
        let chain = reference_chain();
        let steps = chain.instructions(LengthUnit::Meter);
        assert_eq!(steps.len(), 11);
        assert!(matches!(
            &steps[0],
            Instruction::CreateLink { parent: None, name, .. } if name == "Base"
        ));
        assert!(matches!(
            &steps[1],
            Instruction::CreateLink { parent: Some(0), name, .. } if name == "Link_1"
        ));
        assert!(matches!(
            &steps[2],
            Instruction::CreateJoint { parent: 0, child: 1, kind: JointKind::Revolute, .. }
        ));
    }

    #[test]
    fn instructions_unit_test() {
        let chain = reference_chain();
        let steps = chain.instructions(LengthUnit::Centimeter);
        let Instruction::CreateLink { transform, .. } = &steps[1] else {
            panic!("expected link");
        };
        assert_relative_eq!(transform.translation.vector, Vector3::new(0., 0., 20.), epsilon = 1e-9);
        // the chain keeps its meters
        assert_relative_eq!(chain.links()[1].parent_zero_pose.translation.vector.z, 0.2);
    }

    #[test]
    fn recording_adapter_test() {
        let chain = reference_chain();
        let mut adapter = RecordingAdapter::new(LengthUnit::Centimeter);
        let done = materialize(&chain, &mut adapter).unwrap();

        assert_eq!(done.link_count(), 6);
        assert_eq!(done.joint_count(), 5);
        assert_eq!(done.handle(3).map(String::as_str), Some("Link_3"));
        assert_eq!(adapter.log[0], "link Base grounded");
        assert_eq!(adapter.log[1], "link Link_1 under Base");
        assert_eq!(adapter.log[2], "Revolute joint Joint_1 Base -> Link_1");
        assert_relative_eq!(adapter.transforms[2].translation.vector.x, 20., epsilon = 1e-9);
    }

    #[test]
    fn host_failure_test() {
        let chain = reference_chain();

        let mut adapter = FailingAdapter {
            fail_on: "Link_3",
            created: 0,
        };
        let err = materialize(&chain, &mut adapter).unwrap_err();
        assert!(matches!(&err, MaterializeError::Link { name, .. } if name == "Link_3"));
        assert_eq!(err.to_string(), "host failed to create link `Link_3`: host refused Link_3");
        assert_eq!(adapter.created, 3);

        let mut adapter = FailingAdapter {
            fail_on: "Joint_2",
            created: 0,
        };
        let err = materialize(&chain, &mut adapter).unwrap_err();
        assert!(matches!(err, MaterializeError::Joint { .. }));

        // chain is untouched and can be materialized again
        let mut recorder = RecordingAdapter::default();
        assert_eq!(materialize(&chain, &mut recorder).unwrap().link_count(), 6);
    }
}

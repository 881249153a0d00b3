//! Hand-registered member tables, without the derive.

use patcher::{MemberDef, MemberKind, PatchValue, Patchable, Patcher};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Thermostat {
	target: f64,
	history: Vec<f64>,
	serial: String,
}

impl Thermostat {
	fn set_target(&mut self, target: f64) {
		self.history.push(self.target);
		self.target = target;
	}
}

impl Patchable for Thermostat {
	fn members() -> Vec<MemberDef<Self>> {
		vec![
			MemberDef::new("Target", MemberKind::Property).with_setter(Self::set_target),
			MemberDef::new("Serial", MemberKind::Field),
			MemberDef::new("History", MemberKind::Field).private(),
		]
	}
}

#[test]
fn setter_side_effects_run() {
	let patcher = Patcher::new();
	let mut t = Thermostat::default();
	patcher.apply(&mut t, [("target", 21.5), ("TARGET", 19.0)]).unwrap();
	assert_eq!(t.target, 19.0);
	assert_eq!(t.history, vec![0.0, 21.5]);
}

#[test]
fn setterless_and_private_members_are_skipped() {
	let patcher = Patcher::new();
	let mut t = Thermostat::default();
	patcher
		.apply(
			&mut t,
			[("serial", PatchValue::from("X-1")), ("history", PatchValue::Null)],
		)
		.unwrap();
	assert_eq!(t.serial, "");
	assert!(t.history.is_empty());
	assert_eq!(patcher.settable_members::<Thermostat>().len(), 1);
}

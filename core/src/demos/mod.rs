//! Built-in demo scenarios. Each narrates one property-semantics topic
//! against a fresh session; the CLI runs them by name.

mod accessors;
mod attributes;
mod copying;

use crate::errors::SlottedError;
use crate::session::Session;

pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: fn(&mut Session) -> Result<(), SlottedError>,
}

static DEMOS: [Demo; 6] = [
    Demo {
        name: "accessor-basics",
        summary: "a data slot and an accessor pair delegating to it",
        run: accessors::basics,
    },
    Demo {
        name: "inherited-accessors",
        summary: "accessors reached through a parent rebind to the child",
        run: accessors::inherited,
    },
    Demo {
        name: "serial-numbers",
        summary: "a strictly-increasing serial number accessor",
        run: accessors::serial_numbers,
    },
    Demo {
        name: "property-flags",
        summary: "writable, enumerable, configurable under lenient writes",
        run: attributes::flags,
    },
    Demo {
        name: "define-many",
        summary: "batch definition with a computed radius slot",
        run: attributes::define_many,
    },
    Demo {
        name: "descriptor-copy",
        summary: "copying preserves accessor slots instead of snapshotting",
        run: copying::descriptor_copy,
    },
];

pub fn all() -> &'static [Demo] {
    &DEMOS
}

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

/// Runs a demo against a fresh session and returns it, output included.
pub fn run(demo: &Demo) -> Result<Session, SlottedError> {
    let mut session = Session::new();
    (demo.run)(&mut session)?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(name: &str) -> Vec<String> {
        let demo = find(name).expect("demo exists");
        run(demo).expect("demo runs").output().to_vec()
    }

    #[test]
    fn every_demo_runs_cleanly() {
        for demo in all() {
            assert!(run(demo).is_ok(), "demo '{}' failed", demo.name);
        }
    }

    #[test]
    fn accessor_basics_transcript() {
        assert_eq!(
            transcript("accessor-basics"),
            ["o.data -> 0", "o.x -> 42", "o.data -> 42"]
        );
    }

    #[test]
    fn inherited_accessors_shadow_on_the_child() {
        assert_eq!(
            transcript("inherited-accessors"),
            [
                "child.y -> 0",
                "child.y -> 7",
                "p.y -> 0",
                "child.data_y -> 7",
                "p.data_y -> 0",
            ]
        );
    }

    #[test]
    fn serial_numbers_transcript() {
        assert_eq!(
            transcript("serial-numbers"),
            [
                "serialnum.next -> 0",
                "serialnum.next -> 1",
                "serialnum.$n -> 10",
                "serialnum.next = 5 -> error: serial number can only be set to a larger value",
                "serialnum.$n -> 10",
            ]
        );
    }

    #[test]
    fn property_flags_never_lists_the_hidden_slot() {
        let output = transcript("property-flags");
        assert!(output.contains(&"keys o -> [\"y\"]".to_string()));
        assert!(output.contains(&"o.x -> 200".to_string()));
        assert!(output.contains(&"del o.x -> false".to_string()));
        assert!(!output.iter().any(|line| line.contains("\"x\"")));
    }

    #[test]
    fn define_many_computes_the_radius() {
        let output = transcript("define-many");
        assert!(output.contains(&format!("p.r -> {}", std::f64::consts::SQRT_2)));
        assert_eq!(output.last().unwrap(), "p.r -> 5");
    }

    #[test]
    fn descriptor_copy_keeps_accessors_live() {
        let output = transcript("descriptor-copy");
        assert!(output.contains(&"dst.note -> original".to_string()));
        assert!(output.contains(&"dst.data -> 10".to_string()));
        assert!(output.contains(&"dst.x -> 11".to_string()));
        assert!(output.contains(&"src.x -> 5".to_string()));
        assert!(output.contains(&"bare.data -> 5".to_string()));
        assert!(
            output
                .iter()
                .any(|line| line.contains("\"kind\":\"accessor\""))
        );
    }
}

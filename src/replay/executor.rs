use tracing::trace;

use crate::diff::{PatchKind, PatchOperation};
use crate::snapshot::RelativePath;

/// Performs patch operations against some destination store.
///
/// Implementors decide what "create" means (copy, symlink, ...) and how
/// relative paths map onto real locations.
pub trait PatchExecutor {
    type Error;

    fn mkdir(&mut self, path: &RelativePath) -> Result<(), Self::Error>;
    fn rmdir(&mut self, path: &RelativePath) -> Result<(), Self::Error>;
    fn create(&mut self, path: &RelativePath) -> Result<(), Self::Error>;
    fn unlink(&mut self, path: &RelativePath) -> Result<(), Self::Error>;
}

/// Replays `operations` in order, stopping at the first failure.
///
/// Returns the number of operations applied.
pub fn apply_patch<'a, E, I>(executor: &mut E, operations: I) -> Result<usize, E::Error>
where
    E: PatchExecutor,
    I: IntoIterator<Item = &'a PatchOperation>,
{
    let mut applied = 0;
    for operation in operations {
        trace!("Applying {}", operation);
        let path = operation.path();
        match operation.kind() {
            PatchKind::Mkdir => executor.mkdir(path)?,
            PatchKind::Rmdir => executor.rmdir(path)?,
            PatchKind::Create => executor.create(path)?,
            PatchKind::Unlink => executor.unlink(path)?,
        }
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&mut self, kind: &str, path: &RelativePath) -> Result<(), String> {
            if self.fail_on == Some(path.as_str()) {
                return Err(format!("refused {}", path));
            }
            self.calls.push(format!("{} {}", kind, path));
            Ok(())
        }
    }

    impl PatchExecutor for Recorder {
        type Error = String;

        fn mkdir(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
            self.record("mkdir", path)
        }

        fn rmdir(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
            self.record("rmdir", path)
        }

        fn create(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
            self.record("create", path)
        }

        fn unlink(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
            self.record("unlink", path)
        }
    }

    fn op(kind: PatchKind, raw: &str) -> PatchOperation {
        PatchOperation::new(kind, RelativePath::parse(raw).unwrap())
    }

    #[test]
    fn dispatches_each_kind_in_order() {
        let patch = vec![
            op(PatchKind::Unlink, "old.js"),
            op(PatchKind::Rmdir, "old"),
            op(PatchKind::Mkdir, "new"),
            op(PatchKind::Create, "new/a.js"),
        ];
        let mut recorder = Recorder::default();

        assert_eq!(apply_patch(&mut recorder, &patch), Ok(4));
        assert_eq!(
            recorder.calls,
            vec!["unlink old.js", "rmdir old", "mkdir new", "create new/a.js"]
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let patch = vec![
            op(PatchKind::Mkdir, "a"),
            op(PatchKind::Create, "a/b.js"),
            op(PatchKind::Create, "a/c.js"),
        ];
        let mut recorder = Recorder {
            fail_on: Some("a/b.js"),
            ..Recorder::default()
        };

        assert_eq!(
            apply_patch(&mut recorder, &patch),
            Err("refused a/b.js".to_string())
        );
        assert_eq!(recorder.calls, vec!["mkdir a"]);
    }
}

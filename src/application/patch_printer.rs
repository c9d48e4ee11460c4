use colored::Colorize;
use supports_color::Stream;
use treemirror::{PatchKind, PatchOperation};

/// Formats patches as a `# <manifest>` header followed by one
/// `<kind> <path>` line per operation.
#[derive(Debug, Clone, Copy)]
pub struct PatchPrinter {
    colored: bool,
}

impl PatchPrinter {
    /// Colors output only when stdout can show it.
    pub fn detect() -> Self {
        let colored = supports_color::on(Stream::Stdout).is_some();
        colored::control::set_override(colored);
        Self { colored }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn render(&self, header: &str, patch: &[PatchOperation]) -> Vec<String> {
        let mut lines = Vec::with_capacity(patch.len() + 1);
        lines.push(format!("# {header}"));
        lines.extend(
            patch
                .iter()
                .map(|operation| format!("{} {}", self.paint(operation.kind()), operation.path())),
        );
        lines
    }

    fn paint(&self, kind: PatchKind) -> String {
        let name = kind.as_str();
        if !self.colored {
            return name.to_owned();
        }
        match kind {
            PatchKind::Mkdir => name.blue(),
            PatchKind::Create => name.green(),
            PatchKind::Rmdir => name.magenta(),
            PatchKind::Unlink => name.red(),
        }
        .to_string()
    }
}

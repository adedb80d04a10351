// Read-only side-by-side text comparison used for source and metadata rows.

use nbmerge_core::{ContentRenderer, MergeViewError, PaneRole};
use nbmerge_model::{CellDiffModel, DiffModel};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TextPane {
    pub role: PaneRole,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPanes {
    pub panes: Vec<TextPane>,
}

impl TextPanes {
    pub fn single(role: PaneRole, lines: Vec<String>) -> Self {
        Self {
            panes: vec![TextPane { role, lines }],
        }
    }

    /// Number of rows the tallest pane needs.
    pub fn height(&self) -> usize {
        self.panes.iter().map(|p| p.lines.len()).max().unwrap_or(0).max(1)
    }

    pub fn pane(&self, role: PaneRole) -> Option<&TextPane> {
        self.panes.iter().find(|p| p.role == role)
    }

    /// Four-pane source comparison. The merged source must be text.
    pub fn source(
        local: &CellDiffModel,
        remote: &CellDiffModel,
        merged: &CellDiffModel,
        renderer: &dyn ContentRenderer,
    ) -> Result<Self, MergeViewError> {
        require_text(&merged.source, "source")?;
        let base = local.source.base.as_ref().or(remote.source.base.as_ref());
        let render = |value: Option<&Value>, model: &DiffModel| {
            value
                .map(|v| renderer.render(v, model.mimetype()))
                .unwrap_or_default()
        };
        Ok(Self {
            panes: vec![
                TextPane {
                    role: PaneRole::Local,
                    lines: render(local.source.value.as_ref(), &local.source),
                },
                TextPane {
                    role: PaneRole::Base,
                    lines: render(base, &merged.source),
                },
                TextPane {
                    role: PaneRole::Remote,
                    lines: render(remote.source.value.as_ref(), &remote.source),
                },
                TextPane {
                    role: PaneRole::Merged,
                    lines: render(merged.source.value.as_ref(), &merged.source),
                },
            ],
        })
    }

    /// The merged source on its own.
    pub fn merged_source(
        merged: &CellDiffModel,
        renderer: &dyn ContentRenderer,
    ) -> Result<Self, MergeViewError> {
        require_text(&merged.source, "source")?;
        let lines = merged
            .source
            .value
            .as_ref()
            .or(merged.source.base.as_ref())
            .map(|v| renderer.render(v, merged.source.mimetype()))
            .unwrap_or_default();
        Ok(Self::single(PaneRole::Merged, lines))
    }

    /// Four-pane comparison of arbitrary JSON values (metadata).
    pub fn json(
        local: Option<&Value>,
        base: Option<&Value>,
        remote: Option<&Value>,
        merged: Option<&Value>,
        renderer: &dyn ContentRenderer,
    ) -> Self {
        let render = |v: Option<&Value>| {
            v.map(|v| renderer.render(v, "application/json"))
                .unwrap_or_default()
        };
        Self {
            panes: vec![
                TextPane { role: PaneRole::Local, lines: render(local) },
                TextPane { role: PaneRole::Base, lines: render(base) },
                TextPane { role: PaneRole::Remote, lines: render(remote) },
                TextPane { role: PaneRole::Merged, lines: render(merged) },
            ],
        }
    }
}

fn require_text(model: &DiffModel, row: &'static str) -> Result<(), MergeViewError> {
    if model.is_text_like() {
        Ok(())
    } else {
        Err(MergeViewError::IncompatibleContent {
            row,
            mimetype: model.mimetype().to_string(),
        })
    }
}

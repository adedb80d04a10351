#[cfg(test)]
mod tests {
    use crate::{
        classify, CellClassification, CellFlags, CellLayout, CellLayoutSelector, CollapsibleRow,
        PaneColumns, SelectorOptions, SourceRowMode,
    };
    use nbmerge_core::{ChangeCategory, Rect, Vec2};
    use nbmerge_model::{CellDiffModel, CellMergeUnit, DiffModel, OutputDiffModel, OutputItem};
    use serde_json::json;

    fn out(text: &str) -> OutputItem {
        OutputItem::new(json!({"output_type": "stream", "text": text}))
    }

    fn same_output(text: &str) -> OutputDiffModel {
        OutputDiffModel {
            base: Some(out(text)),
            value: Some(out(text)),
            unchanged: true,
        }
    }

    fn side(source: &str) -> CellDiffModel {
        CellDiffModel {
            unchanged: true,
            source: DiffModel::unchanged(source),
            metadata: DiffModel::unchanged("{}"),
            ..Default::default()
        }
    }

    fn unit(local: CellDiffModel, remote: CellDiffModel, merged: CellDiffModel) -> CellMergeUnit {
        CellMergeUnit::new(Some(local), Some(remote), merged).unwrap()
    }

    fn added(source: &str) -> CellDiffModel {
        CellDiffModel {
            added: true,
            unchanged: false,
            source: DiffModel::changed(None, Some(json!(source))),
            ..Default::default()
        }
    }

    fn deleted(source: &str) -> CellDiffModel {
        CellDiffModel {
            deleted: true,
            unchanged: false,
            source: DiffModel::changed(Some(json!(source)), None),
            ..Default::default()
        }
    }

    fn modified(base: &str, value: &str) -> CellDiffModel {
        CellDiffModel {
            unchanged: false,
            source: DiffModel::changed(Some(json!(base)), Some(json!(value))),
            metadata: DiffModel::unchanged("{}"),
            ..Default::default()
        }
    }

    fn selector() -> CellLayoutSelector {
        CellLayoutSelector::default()
    }

    // ──────────────────────────────────────────
    // Collapsed cells
    // ──────────────────────────────────────────

    #[test]
    fn unchanged_cell_collapses_without_category() {
        let layout = selector().select(&unit(side("x"), side("x"), side("x")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: None,
                category: None
            }
        );
    }

    #[test]
    fn local_addition_is_oneway_local() {
        let layout = selector().select(&unit(added("x"), side("x"), added("x")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: Some("Cell added locally"),
                category: Some(ChangeCategory::OnewayLocal),
            }
        );
    }

    #[test]
    fn remote_deletion_is_oneway_remote() {
        let layout = selector().select(&unit(side("x"), deleted("x"), deleted("x")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: Some("Cell deleted remotely"),
                category: Some(ChangeCategory::OnewayRemote),
            }
        );
    }

    #[test]
    fn deletion_on_both_sides() {
        let layout = selector().select(&unit(deleted("x"), deleted("x"), deleted("x")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: Some("Deleted on both sides"),
                category: Some(ChangeCategory::TwowayDeletion),
            }
        );
    }

    #[test]
    fn identical_additions_on_both_sides() {
        let layout = selector().select(&unit(added("y"), added("y"), added("y")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: Some("Added on both sides"),
                category: Some(ChangeCategory::TwowayAddition),
            }
        );
    }

    #[test]
    fn differing_additions_need_four_way_view() {
        let layout = selector().select(&unit(added("a"), added("b"), added("a")));
        assert!(!layout.is_collapsed());
    }

    #[test]
    fn missing_sides_collapse_without_header() {
        let u = CellMergeUnit::new(None, None, added("z")).unwrap();
        assert_eq!(
            selector().select(&u),
            CellLayout::Collapsed {
                header: None,
                category: None
            }
        );
    }

    #[test]
    fn local_addition_collapses_whatever_remote_did() {
        let flags = CellFlags {
            has_local: true,
            has_remote: true,
            local_added: true,
            remote_added: false,
            remote_unchanged: false,
            ..CellFlags::default()
        };
        assert_eq!(
            classify(&flags),
            CellClassification::Collapsed {
                header: Some("Cell added locally"),
                category: Some(ChangeCategory::OnewayLocal),
            }
        );

        let layout = selector().select(&unit(added("n"), modified("a", "b"), added("n")));
        assert_eq!(
            layout,
            CellLayout::Collapsed {
                header: Some("Cell added locally"),
                category: Some(ChangeCategory::OnewayLocal),
            }
        );
    }

    #[test]
    fn remote_addition_against_modified_local_collapses() {
        let flags = CellFlags {
            has_local: true,
            has_remote: true,
            remote_added: true,
            ..CellFlags::default()
        };
        assert_eq!(
            classify(&flags),
            CellClassification::Collapsed {
                header: Some("Cell added remotely"),
                category: Some(ChangeCategory::OnewayRemote),
            }
        );
    }

    #[test]
    fn deletion_against_modification_is_not_one_sided() {
        let layout = selector().select(&unit(deleted("a"), modified("a", "b"), modified("a", "b")));
        assert!(!layout.is_collapsed());
    }

    // ──────────────────────────────────────────
    // Row plans
    // ──────────────────────────────────────────

    #[test]
    fn one_changed_output_expands_outputs_and_omits_metadata() {
        let mut local = side("x");
        local.unchanged = false;
        local.outputs = vec![
            same_output("1"),
            OutputDiffModel {
                base: Some(out("2")),
                value: Some(out("two")),
                unchanged: false,
            },
            same_output("3"),
        ];
        let mut remote = side("x");
        remote.outputs = vec![same_output("1"), same_output("2"), same_output("3")];
        let merged = local.clone();

        let layout = selector().select(&unit(local, remote, merged));
        let CellLayout::FourWay(plan) = layout else {
            panic!("expected four-way layout, got {layout:?}");
        };
        assert_eq!(plan.source, SourceRowMode::Collapsed);
        assert_eq!(plan.metadata, None);
        assert_eq!(
            plan.outputs,
            Some(CollapsibleRow {
                changed: true,
                expanded: true
            })
        );
    }

    #[test]
    fn changed_source_and_metadata_rows() {
        let mut local = modified("a", "b");
        local.metadata = DiffModel::changed(Some(json!({})), Some(json!({"tags": ["x"]})));
        let remote = modified("a", "c");
        let merged = modified("a", "b");

        let CellLayout::FourWay(plan) = selector().select(&unit(local, remote, merged)) else {
            panic!("expected four-way layout");
        };
        assert_eq!(plan.source, SourceRowMode::FourWay);
        assert_eq!(
            plan.metadata,
            Some(CollapsibleRow {
                changed: true,
                expanded: true
            })
        );
        assert_eq!(plan.outputs, None);
    }

    #[test]
    fn deleted_side_metadata_is_ignored() {
        let mut local = deleted("a");
        local.metadata = DiffModel::changed(Some(json!({"k": 1})), None);
        let remote = modified("a", "b");
        let merged = modified("a", "b");

        let CellLayout::FourWay(plan) = selector().select(&unit(local, remote, merged)) else {
            panic!("expected four-way layout");
        };
        assert_eq!(plan.metadata, None);
    }

    #[test]
    fn unchanged_nonempty_outputs_are_collapsed_by_default() {
        let mut local = modified("a", "b");
        local.outputs = vec![same_output("1")];
        let mut remote = modified("a", "c");
        remote.outputs = vec![same_output("1")];
        let mut merged = modified("a", "b");
        merged.outputs = vec![same_output("1")];
        let u = unit(local, remote, merged);

        let CellLayout::FourWay(plan) = selector().select(&u) else {
            panic!("expected four-way layout");
        };
        assert_eq!(
            plan.outputs,
            Some(CollapsibleRow {
                changed: false,
                expanded: false
            })
        );

        let eager = CellLayoutSelector::new(SelectorOptions {
            expand_unchanged_outputs: true,
        });
        let CellLayout::FourWay(plan) = eager.select(&u) else {
            panic!("expected four-way layout");
        };
        assert_eq!(plan.outputs.map(|r| r.expanded), Some(true));
    }

    #[test]
    fn selection_is_idempotent() {
        let u = unit(modified("a", "b"), modified("a", "c"), modified("a", "b"));
        let s = selector();
        assert_eq!(s.select(&u), s.select(&u));
    }

    #[test]
    fn classify_is_a_pure_function_of_flags() {
        for bits in 0u32..1024 {
            let bit = |n: u32| bits & (1 << n) != 0;
            let flags = CellFlags {
                has_local: bit(0),
                has_remote: bit(1),
                local_added: bit(2),
                local_deleted: bit(3),
                remote_added: bit(4),
                remote_deleted: bit(5),
                local_unchanged: bit(6),
                remote_unchanged: bit(7),
                both_unchanged: bit(8),
                identical_additions: bit(9),
            };
            let first = classify(&flags);
            assert_eq!(first, classify(&flags));
            if flags.both_unchanged && flags.has_local && flags.has_remote {
                assert!(matches!(first, CellClassification::Collapsed { .. }));
            }
        }
    }

    // ──────────────────────────────────────────
    // Pane geometry
    // ──────────────────────────────────────────

    #[test]
    fn panes_are_laid_out_side_by_side() {
        let columns = PaneColumns::new(Vec2::new(0.0, 10.0), 20.0, 1.0, 3.0);
        let panes = columns.compute_uniform(&[2, 0, 1]);
        assert_eq!(panes.len(), 3);
        assert_eq!(panes[0].rect, Rect::new(0.0, 10.0, 20.0, 9.0));
        assert_eq!(panes[1].rect.x, 21.0);
        assert_eq!(panes[2].rect.x, 42.0);
        assert_eq!(panes[0].items[1], Rect::new(0.0, 13.0, 20.0, 3.0));
        assert!(panes[1].items.is_empty());
        assert_eq!(columns.total_width(3), 62.0);
    }

    #[test]
    fn item_hit_testing() {
        let columns = PaneColumns::new(Vec2::new(0.0, 0.0), 20.0, 0.0, 2.0);
        let panes = columns.compute(&[vec![2.0, 4.0]]);
        assert_eq!(panes[0].item_at(Vec2::new(5.0, 1.0)), Some(0));
        assert_eq!(panes[0].item_at(Vec2::new(5.0, 2.0)), Some(1));
        assert_eq!(panes[0].item_at(Vec2::new(5.0, 5.9)), Some(1));
        // Trailing slot belongs to the pane but to no item.
        assert!(panes[0].rect.contains(Vec2::new(5.0, 7.0)));
        assert_eq!(panes[0].item_at(Vec2::new(5.0, 7.0)), None);
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeSpatial, create_test_group};
use crate::{
    AREA_NUMBER_FORMAT, AreaDeltaResolver, AreaReport, BLOCK_HEADER_ROWS, BlockTemplate,
    BufferCell, CellValue, CoreError, MergeRange, ReportBlock, ReportLayoutEngine, STANDARD_FONT_NAME,
    StyleDescriptor, TOTAL_MARKER, finalize, plan_blocks,
};
use boundary_recon_domain::TownGroup;

fn spatial() -> FakeSpatial {
    FakeSpatial::default()
        .with_layer("old", &[("1001", 10.0), ("1002", 20.25), ("2001", 5.5)])
        .with_layer("new", &[("1001", 12.5), ("1002", 19.75), ("2001", 5.5)])
}

fn groups() -> Vec<TownGroup> {
    vec![
        create_test_group("20", "Beta", &[("2001", "B1")]),
        create_test_group("10", "Alpha", &[("1001", "A1"), ("1002", "A2"), ("1003", "A3")]),
    ]
}

fn captioned_template() -> BlockTemplate {
    let caption: BufferCell = BufferCell {
        value: Some(CellValue::Text(String::from("村里代碼"))),
        style: StyleDescriptor {
            number_format: Some(String::from("@")),
            ..StyleDescriptor::default()
        },
    };
    let mut rows: Vec<Vec<BufferCell>> = vec![Vec::new(); 5];
    rows[2] = vec![BufferCell::default(), caption];
    BlockTemplate::new(rows).unwrap()
}

fn run_layout(groups: &[TownGroup]) -> AreaReport {
    let spatial: FakeSpatial = spatial();
    let template: BlockTemplate = captioned_template();
    let resolver = AreaDeltaResolver::new(
        &spatial,
        Some(String::from("old")),
        Some(String::from("new")),
        "VILLCODE",
    );
    let engine = ReportLayoutEngine::new(&template, &resolver);
    engine.layout(groups).unwrap()
}

#[test]
fn test_plan_blocks_leaves_one_blank_row() {
    let blocks: Vec<ReportBlock> = plan_blocks(&[3, 1, 2]).unwrap();

    assert_eq!(blocks[0].start_row, 1);
    assert_eq!(blocks[0].first_entity_row(), 4);
    assert_eq!(blocks[0].total_row(), 7);
    assert_eq!(blocks[1].start_row, 9);
    assert_eq!(blocks[1].total_row(), 13);
    assert_eq!(blocks[2].start_row, 15);
    for pair in blocks.windows(2) {
        assert_eq!(pair[1].start_row, pair[0].next_start());
        assert!(pair[0].total_row() < pair[1].start_row);
    }
}

#[test]
fn test_plan_blocks_rejects_empty_block() {
    let result: Result<Vec<ReportBlock>, CoreError> = plan_blocks(&[2, 0]);
    assert!(matches!(result, Err(CoreError::TemplateMismatch(_))));
}

#[test]
fn test_layout_orders_towns_by_code() {
    let report: AreaReport = run_layout(&groups());

    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.summaries[0].town_code, "10");
    assert_eq!(report.summaries[1].town_code, "20");
    assert_eq!(report.blocks[0].entity_row_count, 3);
    assert_eq!(report.blocks[1].start_row, report.blocks[0].total_row() + 2);
}

#[test]
fn test_layout_writes_town_info_row() {
    let report: AreaReport = run_layout(&groups());
    let info: u32 = report.blocks[0].info_row();

    assert_eq!(report.buffer.text(info, 1), Some("Test County"));
    assert_eq!(report.buffer.text(info, 2), Some("Alpha"));
    assert_eq!(report.buffer.text(info, 3), Some("10"));
    assert_eq!(report.buffer.number(info, 4), Some(1000.0));
    assert_eq!(report.buffer.number(info, 5), Some(1000.0));
}

#[test]
fn test_layout_writes_member_rows_with_formula() {
    let report: AreaReport = run_layout(&groups());
    let first: u32 = report.blocks[0].first_entity_row();
    let buffer = &report.buffer;

    assert_eq!(buffer.text(first, 1), Some("Alpha"));
    assert_eq!(buffer.text(first, 2), Some("1001"));
    assert_eq!(buffer.text(first, 3), Some("A1"));
    assert_eq!(buffer.number(first, 4), Some(10.0));
    assert_eq!(buffer.number(first, 5), Some(12.5));
    assert_eq!(
        buffer.value(first, 6),
        Some(&CellValue::Formula {
            expression: format!("E{first}-D{first}"),
            cached: 2.5,
        })
    );
    let delta_style = &buffer.cell(first, 6).unwrap().style;
    assert_eq!(delta_style.number_format.as_deref(), Some(AREA_NUMBER_FORMAT));
    let font = buffer.cell(first, 8).unwrap().style.font.clone().unwrap();
    assert_eq!(font.name.as_deref(), Some(STANDARD_FONT_NAME));
}

#[test]
fn test_layout_missing_village_is_zero_row() {
    let report: AreaReport = run_layout(&groups());
    let row: u32 = report.blocks[0].first_entity_row() + 2;

    assert_eq!(report.buffer.text(row, 2), Some("1003"));
    assert_eq!(report.buffer.number(row, 4), Some(0.0));
    assert_eq!(report.buffer.number(row, 5), Some(0.0));
    assert_eq!(report.buffer.number(row, 6), Some(0.0));
    assert_eq!(report.summaries[0].village_count, 3);
}

#[test]
fn test_layout_totals_match_member_sums() {
    let report: AreaReport = run_layout(&groups());

    for (block, summary) in report.blocks.iter().zip(&report.summaries) {
        let mut old_sum: f64 = 0.0;
        let mut new_sum: f64 = 0.0;
        for row in block.first_entity_row()..block.total_row() {
            old_sum += report.buffer.number(row, 4).unwrap();
            new_sum += report.buffer.number(row, 5).unwrap();
            let delta: f64 = report.buffer.number(row, 6).unwrap();
            assert_eq!(
                delta.to_bits(),
                (report.buffer.number(row, 5).unwrap() - report.buffer.number(row, 4).unwrap())
                    .to_bits()
            );
        }
        let total: u32 = block.total_row();
        assert_eq!(report.buffer.number(total, 4).unwrap().to_bits(), old_sum.to_bits());
        assert_eq!(report.buffer.number(total, 5).unwrap().to_bits(), new_sum.to_bits());
        assert_eq!(
            report.buffer.number(total, 6).unwrap().to_bits(),
            (new_sum - old_sum).to_bits()
        );
        assert_eq!(summary.old_total.to_bits(), old_sum.to_bits());
        assert_eq!(summary.new_total.to_bits(), new_sum.to_bits());
    }
}

#[test]
fn test_layout_total_row_label_and_formats() {
    let report: AreaReport = run_layout(&groups());
    let total: u32 = report.blocks[0].total_row();

    assert_eq!(report.buffer.text(total, 1), Some("Alpha 總計"));
    for column in 4..=6 {
        let style = &report.buffer.cell(total, column).unwrap().style;
        assert_eq!(style.number_format.as_deref(), Some(AREA_NUMBER_FORMAT));
    }
    assert_eq!(
        report.buffer.cell(total, 3).unwrap().style.number_format,
        None
    );
}

#[test]
fn test_layout_stamps_template_into_every_block() {
    let report: AreaReport = run_layout(&groups());
    for block in &report.blocks {
        let caption_row: u32 = block.start_row + BLOCK_HEADER_ROWS - 1;
        assert_eq!(report.buffer.text(caption_row, 2), Some("村里代碼"));
    }
}

#[test]
fn test_layout_counts_rows() {
    let report: AreaReport = run_layout(&groups());
    let totals: usize = (1..=report.buffer.max_row())
        .filter(|row| {
            report
                .buffer
                .text(*row, 1)
                .is_some_and(|text| text.contains(TOTAL_MARKER))
        })
        .count();
    let members: u32 = report.blocks.iter().map(|block| block.entity_row_count).sum();

    assert_eq!(totals, 2);
    assert_eq!(report.buffer.total_rows().len(), 2);
    assert_eq!(members, 4);
    for block in &report.blocks {
        assert!(report.buffer.cell(block.total_row() + 1, 1).is_none());
    }
}

#[test]
fn test_layout_skips_empty_groups() {
    let mut input: Vec<TownGroup> = groups();
    input.push(create_test_group("15", "Empty", &[]));

    let report: AreaReport = run_layout(&input);

    assert_eq!(report.blocks.len(), 2);
    assert!(report.summaries.iter().all(|summary| summary.town_code != "15"));
}

#[test]
fn test_layout_rejects_non_finite_reference_area() {
    let spatial: FakeSpatial = spatial();
    let template: BlockTemplate = BlockTemplate::blank();
    let resolver = AreaDeltaResolver::new(&spatial, None, None, "VILLCODE");
    let engine = ReportLayoutEngine::new(&template, &resolver);

    let mut input: Vec<TownGroup> = groups();
    input[0].reference_area = f64::NAN;

    let result: Result<AreaReport, CoreError> = engine.layout(&input);
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_layout_then_finalize_merges_each_total() {
    let mut report: AreaReport = run_layout(&groups());
    assert_eq!(finalize(&mut report.buffer), 2);
    let rows: Vec<u32> = report.buffer.merges().iter().map(|range| range.row).collect();
    assert_eq!(rows, vec![report.blocks[0].total_row(), report.blocks[1].total_row()]);
}

#[test]
fn test_layout_no_groups() {
    let report: AreaReport = run_layout(&[]);
    assert!(report.blocks.is_empty());
    assert!(report.buffer.is_empty());
}

#[test]
fn test_layout_total_delta_matches_row_deltas() {
    let report: AreaReport = run_layout(&groups());
    for block in &report.blocks {
        let row_deltas: f64 = (block.first_entity_row()..block.total_row())
            .filter_map(|row| report.buffer.number(row, 6))
            .sum();
        let total_delta: f64 = report.buffer.number(block.total_row(), 6).unwrap();
        assert!((row_deltas - total_delta).abs() < 1e-9);
    }
}

#[test]
fn test_layout_repeats_header_merges_in_every_block() {
    let spatial: FakeSpatial = spatial();
    let template: BlockTemplate = BlockTemplate::blank()
        .with_header_merges(&[MergeRange::new(1, 1, 8)])
        .unwrap();
    let resolver = AreaDeltaResolver::new(&spatial, None, None, "VILLCODE");
    let engine = ReportLayoutEngine::new(&template, &resolver);

    let report: AreaReport = engine.layout(&groups()).unwrap();

    let merged: Vec<MergeRange> = report.buffer.merges().iter().copied().collect();
    assert_eq!(
        merged,
        vec![
            MergeRange::new(report.blocks[0].start_row, 1, 8),
            MergeRange::new(report.blocks[1].start_row, 1, 8),
        ]
    );
}

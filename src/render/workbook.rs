//! Output workbook writer.

use super::model::ReportModel;
use anyhow::{Context, Result};
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartFont, ChartPoint, ChartSolidFill, ChartType, Color, Format,
    FormatAlign, FormatBorder, Workbook,
};
use std::path::Path;

pub const DETAIL_SHEET: &str = "Review Board";
pub const OVERVIEW_SHEET: &str = "Overview";

pub const DETAIL_HEADERS: [&str; 8] = [
    "SVN Link Review File",
    "Actual Version Reviewed",
    "Last Changed Date",
    "File Name",
    "Folder Name",
    "Main Controller",
    "Last Changed Rev",
    "Review Score",
];
const DETAIL_WIDTHS: [f64; 8] = [30.0, 28.0, 25.0, 62.0, 25.0, 23.0, 23.0, 20.0];

pub const OVERVIEW_HEADERS: [&str; 3] = ["Score Range", "Count", "Percentage"];
const OVERVIEW_WIDTHS: [f64; 3] = [30.0, 20.0, 30.0];

const HEADER_FILL: u32 = 0xADD8E6;
const FONT_SIZE: u32 = 14;

/// Write the report to `path`, creating parent directories as needed.
pub fn write_workbook(model: &ReportModel, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(model)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating output directory {}", parent.display()))?;
    }
    workbook.save(path).with_context(|| format!("Failed writing report {}", path.display()))?;
    tracing::info!("Data successfully saved to '{}'", path.display());
    Ok(())
}

/// Render the report into an in-memory `.xlsx` file.
pub fn render_workbook(model: &ReportModel) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(model)?;
    workbook.save_to_buffer().context("Failed rendering report workbook")
}

fn build_workbook(model: &ReportModel) -> Result<Workbook> {
    let bin_colors = model
        .bins
        .iter()
        .map(|bin| bin.rgb().map(Color::RGB))
        .collect::<Result<Vec<_>>>()?;

    let mut workbook = Workbook::new();
    write_detail_sheet(&mut workbook, model, &bin_colors)?;
    write_overview_sheet(&mut workbook, model, &bin_colors)?;
    Ok(workbook)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_size(FONT_SIZE)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn body_format(align: FormatAlign) -> Format {
    Format::new()
        .set_align(align)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn highlight_format(color: Color) -> Format {
    body_format(FormatAlign::Center)
        .set_bold()
        .set_font_size(FONT_SIZE)
        .set_background_color(color)
}

/// Fill color of a detail row's score cell; `None` leaves it unhighlighted.
fn score_fill(band: Option<usize>, bin_colors: &[Color]) -> Option<Color> {
    band.and_then(|band| bin_colors.get(band)).copied()
}

fn write_detail_sheet(
    workbook: &mut Workbook,
    model: &ReportModel,
    bin_colors: &[Color],
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(DETAIL_SHEET)?;

    let header = header_format();
    for (col, title) in DETAIL_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (col, width) in DETAIL_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    let left = body_format(FormatAlign::Left);
    let center = body_format(FormatAlign::Center);

    for (idx, row) in model.details.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string_with_format(r, 0, &row.path, &left)?;
        let centered = [
            &row.version,
            &row.date,
            &row.file_name,
            &row.folder_name,
            &row.classification,
            &row.revision,
        ];
        for (offset, value) in centered.into_iter().enumerate() {
            sheet.write_string_with_format(r, offset as u16 + 1, value, &center)?;
        }
        let fill = score_fill(row.band, bin_colors).map(highlight_format);
        sheet.write_string_with_format(r, 7, &row.score, fill.as_ref().unwrap_or(&center))?;
    }

    sheet.autofilter(0, 0, model.details.len() as u32, 7)?;
    Ok(())
}

fn write_overview_sheet(
    workbook: &mut Workbook,
    model: &ReportModel,
    bin_colors: &[Color],
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(OVERVIEW_SHEET)?;

    let header = header_format();
    for (col, title) in OVERVIEW_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (col, width) in OVERVIEW_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    let cell = body_format(FormatAlign::Center).set_bold().set_font_size(FONT_SIZE);
    for (idx, row) in model.overview.iter().enumerate() {
        let r = idx as u32 + 1;
        let label =
            bin_colors.get(idx).map(|c| highlight_format(*c)).unwrap_or_else(|| cell.clone());
        sheet.write_string_with_format(r, 0, &row.label, &label)?;
        sheet.write_number_with_format(r, 1, row.count as f64, &cell)?;
        sheet.write_string_with_format(r, 2, &row.percentage, &cell)?;
    }

    let last_bin_row = model.overview.len() as u32;
    let plain = body_format(FormatAlign::Center);
    let unscored_row = last_bin_row + 1;
    sheet.write_string_with_format(unscored_row, 0, "Unscored", &plain)?;
    sheet.write_number_with_format(unscored_row, 1, model.unscored as f64, &plain)?;
    sheet.write_string_with_format(unscored_row, 2, &model.unscored_percentage, &plain)?;
    sheet.write_string_with_format(unscored_row + 1, 0, "Failed", &plain)?;
    sheet.write_number_with_format(unscored_row + 1, 1, model.failed as f64, &plain)?;

    if last_bin_row > 0 {
        let chart = distribution_chart(last_bin_row, bin_colors);
        sheet.insert_chart(last_bin_row + 4, 0, &chart)?;
    }
    Ok(())
}

/// Pie chart over the bin rows `1..=last_row` of the overview sheet.
fn distribution_chart(last_row: u32, bin_colors: &[Color]) -> Chart {
    let mut chart = Chart::new(ChartType::Pie);
    chart.title().set_name("Review Score Distribution");

    let mut data_label = ChartDataLabel::new();
    data_label.show_percentage().set_font(ChartFont::new().set_bold().set_size(FONT_SIZE));

    let points: Vec<ChartPoint> = bin_colors
        .iter()
        .map(|color| ChartPoint::new().set_format(ChartSolidFill::new().set_color(*color)))
        .collect();

    chart
        .add_series()
        .set_name((OVERVIEW_SHEET, 0, 1))
        .set_categories((OVERVIEW_SHEET, 1, 0, last_row, 0))
        .set_values((OVERVIEW_SHEET, 1, 1, last_row, 1))
        .set_data_label(&data_label)
        .set_points(&points);
    chart
}

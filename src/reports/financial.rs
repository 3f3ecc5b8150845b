use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};

use crate::domain::money::format_ars;
use crate::domain::stats::FinancialSummary;
use crate::errors::ServerError;

/// A composed report: the document bytes plus the deterministic filename the
/// browser should save it under.
#[derive(Debug)]
pub struct FinancialReport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Fixed-layout financial report workbook: title block, optional period
/// line, a rule, then the labeled summary. Composing with zero estimates
/// still yields a well-formed document with zero-valued rows.
pub fn compose_financial_report(
    summary: &FinancialSummary,
    period: Option<&str>,
) -> Result<FinancialReport, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let title = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();
    let rule = Format::new().set_border_bottom(FormatBorder::Medium);

    worksheet.set_column_width(0, 32).map_err(xlsx)?;
    worksheet.set_column_width(1, 16).map_err(xlsx)?;

    worksheet
        .write_string_with_format(0, 0, "Roncoroni", &title)
        .map_err(xlsx)?;
    worksheet
        .write_string(1, 0, "Informe Financiero")
        .map_err(xlsx)?;

    let mut row: u32 = 2;
    if let Some(key) = period {
        worksheet
            .write_string(row, 0, &period_label(key))
            .map_err(xlsx)?;
        row += 1;
    }

    worksheet.write_blank(row, 0, &rule).map_err(xlsx)?;
    worksheet.write_blank(row, 1, &rule).map_err(xlsx)?;
    row += 2;

    worksheet
        .write_string(row, 0, "Cantidad de presupuestos")
        .map_err(xlsx)?;
    worksheet
        .write_number(row, 1, summary.count as f64)
        .map_err(xlsx)?;
    row += 1;

    worksheet
        .write_string(row, 0, "Ganancias por mano de obra")
        .map_err(xlsx)?;
    worksheet
        .write_string(row, 1, &format_ars(summary.labor))
        .map_err(xlsx)?;
    row += 1;

    worksheet
        .write_string(row, 0, "Costo de repuestos")
        .map_err(xlsx)?;
    worksheet
        .write_string(row, 1, &format_ars(summary.parts))
        .map_err(xlsx)?;
    row += 1;

    worksheet
        .write_string_with_format(row, 0, "TOTAL", &bold)
        .map_err(xlsx)?;
    worksheet
        .write_string_with_format(row, 1, &format_ars(summary.grand_total), &bold)
        .map_err(xlsx)?;

    let bytes = workbook.save_to_buffer().map_err(xlsx)?;

    Ok(FinancialReport {
        bytes,
        filename: report_filename(period),
    })
}

/// `report-<period>.xlsx` when a month is selected, else `report-general.xlsx`.
pub fn report_filename(period: Option<&str>) -> String {
    match period {
        Some(key) => format!("report-{key}.xlsx"),
        None => "report-general.xlsx".to_string(),
    }
}

/// `"2024-01"` -> `"Enero 2024"`. Unparseable keys render as-is.
pub fn period_label(period: &str) -> String {
    const MONTHS: [&str; 12] = [
        "Enero",
        "Febrero",
        "Marzo",
        "Abril",
        "Mayo",
        "Junio",
        "Julio",
        "Agosto",
        "Septiembre",
        "Octubre",
        "Noviembre",
        "Diciembre",
    ];

    let parsed = period.split_once('-').and_then(|(year, month)| {
        let month: usize = month.parse().ok()?;
        let name = MONTHS.get(month.checked_sub(1)?)?;
        Some(format!("{name} {year}"))
    });

    parsed.unwrap_or_else(|| period.to_string())
}

fn xlsx(e: XlsxError) -> ServerError {
    ServerError::XlsxError(e.to_string())
}

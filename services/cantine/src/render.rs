//! Report renderers.
//!
//! Both formats consume the same [`Rapport`] intermediate form, so PDF and
//! spreadsheet exports can never diverge in content, only in presentation.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::CantineError;
use crate::usecase::rapport::Rapport;

pub const CONTENT_TYPE_PDF: &str = "application/pdf";
pub const CONTENT_TYPE_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const ENTETES: [&str; 5] = ["Date", "Élève", "Classe", "Plat principal", "Menu complet"];

// A4 portrait with a 20mm top margin; rows every 6mm.
const LIGNES_PAR_PAGE: usize = 40;

/// Render the report as a paginated A4 PDF (builtin Helvetica, no font
/// assets required).
pub fn render_pdf(rapport: &Rapport) -> Result<Vec<u8>, CantineError> {
    let (doc, page1, layer1) =
        PdfDocument::new(&rapport.titre, Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CantineError::Internal(anyhow::anyhow!("load builtin font: {e}")))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| CantineError::Internal(anyhow::anyhow!("load builtin font: {e}")))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    layer.use_text(&rapport.titre, 16.0, Mm(20.0), Mm(277.0), &font_bold);

    let entetes = ENTETES.join(" | ");
    let colonnes = |ligne: &crate::domain::types::RapportLigne| {
        format!(
            "{} | {} | {} | {} | {}",
            ligne.date.format("%d/%m/%Y"),
            ligne.eleve,
            ligne.classe,
            ligne.plat_principal,
            ligne.menu_complet
        )
    };

    let mut y = 265.0;
    layer.use_text(&entetes, 11.0, Mm(20.0), Mm(y), &font_bold);
    y -= 8.0;

    for (index, ligne) in rapport.lignes.iter().enumerate() {
        if index > 0 && index % LIGNES_PAR_PAGE == 0 {
            let (page, layer_index) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_index);
            y = 277.0;
            layer.use_text(&entetes, 11.0, Mm(20.0), Mm(y), &font_bold);
            y -= 8.0;
        }
        layer.use_text(colonnes(ligne), 9.0, Mm(20.0), Mm(y), &font);
        y -= 6.0;
    }

    y -= 6.0;
    for (label, valeur) in &rapport.stats {
        layer.use_text(format!("{label}: {valeur}"), 10.0, Mm(20.0), Mm(y), &font_bold);
        y -= 6.0;
    }

    doc.save_to_bytes()
        .map_err(|e| CantineError::Internal(anyhow::anyhow!("save pdf: {e}")))
}

/// Render the report as an XLSX workbook.
pub fn render_xlsx(rapport: &Rapport) -> Result<Vec<u8>, CantineError> {
    let xlsx = |e: rust_xlsxwriter::XlsxError| {
        CantineError::Internal(anyhow::anyhow!("render xlsx: {e}"))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let titre_format = Format::new().set_bold().set_font_size(14);
    let entete_format = Format::new().set_bold();

    worksheet
        .write_string_with_format(0, 0, &rapport.titre, &titre_format)
        .map_err(xlsx)?;

    for (col, entete) in ENTETES.iter().enumerate() {
        worksheet
            .write_string_with_format(2, col as u16, *entete, &entete_format)
            .map_err(xlsx)?;
    }

    let mut row = 3u32;
    for ligne in &rapport.lignes {
        worksheet
            .write_string(row, 0, &ligne.date.format("%d/%m/%Y").to_string())
            .map_err(xlsx)?;
        worksheet.write_string(row, 1, &ligne.eleve).map_err(xlsx)?;
        worksheet.write_string(row, 2, &ligne.classe).map_err(xlsx)?;
        worksheet
            .write_string(row, 3, &ligne.plat_principal)
            .map_err(xlsx)?;
        worksheet
            .write_string(row, 4, &ligne.menu_complet)
            .map_err(xlsx)?;
        row += 1;
    }

    row += 1;
    for (label, valeur) in &rapport.stats {
        worksheet
            .write_string_with_format(row, 0, label, &entete_format)
            .map_err(xlsx)?;
        worksheet.write_string(row, 1, valeur).map_err(xlsx)?;
        row += 1;
    }

    workbook.save_to_buffer().map_err(xlsx)
}

/// Render an arbitrary header + rows table as an XLSX workbook (student
/// export and similar flat listings).
pub fn render_xlsx_table(
    titre: &str,
    entetes: &[&str],
    lignes: &[Vec<String>],
) -> Result<Vec<u8>, CantineError> {
    let xlsx = |e: rust_xlsxwriter::XlsxError| {
        CantineError::Internal(anyhow::anyhow!("render xlsx table: {e}"))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let titre_format = Format::new().set_bold().set_font_size(14);
    let entete_format = Format::new().set_bold();

    worksheet
        .write_string_with_format(0, 0, titre, &titre_format)
        .map_err(xlsx)?;
    for (col, entete) in entetes.iter().enumerate() {
        worksheet
            .write_string_with_format(2, col as u16, *entete, &entete_format)
            .map_err(xlsx)?;
    }
    for (index, ligne) in lignes.iter().enumerate() {
        for (col, valeur) in ligne.iter().enumerate() {
            worksheet
                .write_string(3 + index as u32, col as u16, valeur)
                .map_err(xlsx)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::types::RapportLigne;

    fn rapport() -> Rapport {
        let lignes = (0..90)
            .map(|i| RapportLigne {
                date: NaiveDate::from_ymd_opt(2024, 5, 1 + (i % 28)).unwrap(),
                eleve: format!("Élève {i}"),
                classe: "6eme A".into(),
                plat_principal: "Riz au poisson".into(),
                menu_complet: "Riz au poisson - Salade".into(),
            })
            .collect();
        Rapport {
            titre: "Rapport Mensuel - 5/2024".into(),
            nom_fichier: "rapport_mensuel_2024_05".into(),
            lignes,
            stats: vec![("Nombre total de repas".into(), "90".into())],
        }
    }

    #[test]
    fn should_render_pdf_with_magic_header() {
        let bytes = render_pdf(&rapport()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn should_render_xlsx_as_zip_container() {
        let bytes = render_xlsx(&rapport()).unwrap();
        // XLSX is a ZIP archive.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn should_render_plain_table() {
        let bytes = render_xlsx_table(
            "Export",
            &["Prénom", "Nom"],
            &[vec!["Awa".into(), "Diallo".into()]],
        )
        .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn should_render_empty_report() {
        let vide = Rapport {
            titre: "Rapport Journalier - 01/05/2024".into(),
            nom_fichier: "rapport_journalier_20240501".into(),
            lignes: vec![],
            stats: vec![("Nombre total de repas".into(), "0".into())],
        };
        assert!(render_pdf(&vide).unwrap().starts_with(b"%PDF"));
        assert!(render_xlsx(&vide).unwrap().starts_with(b"PK"));
    }
}

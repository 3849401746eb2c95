use log::debug;

use crate::model::{Cell, Row, Sheet, Workbook};

/// A recipe-name column and the language code of its sibling columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageBinding {
    pub name_column: &'static str,
    pub code: &'static str,
}

const fn binding(name_column: &'static str, code: &'static str) -> LanguageBinding {
    LanguageBinding { name_column, code }
}

/// Multilingual name columns, searched in this order within each sheet
pub const LANGUAGE_BINDINGS: &[LanguageBinding] = &[
    binding("TamilName", "ta"),
    binding("tamilname", "ta"),
    binding("hindiName", "hn"),
    binding("malayalamName", "kl"),
    binding("kannadaName", "kn"),
    binding("teluguName", "te"),
    binding("frenchName", "french"),
    binding("spanishName", "spanish"),
    binding("germanName", "german"),
];

/// Plain name columns tried when no multilingual column matched in a sheet
pub const FALLBACK_NAME_COLUMNS: &[&str] = &["name", "Name"];

pub const FALLBACK_LANGUAGE: &str = "en";

/// Where a recipe was found and which language its columns use
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub sheet: &'a Sheet,
    pub name_column: &'a str,
    pub language: &'a str,
    pub row: &'a Row,
}

impl<'a> Resolution<'a> {
    /// First column containing `ingredients_<language>`, else `ingredients_en`
    pub fn ingredient_column(&self) -> Option<&'a str> {
        let wanted = format!("ingredients_{}", self.language.to_lowercase());
        find_column(self.sheet, |c| c.to_lowercase().contains(&wanted)).or_else(|| {
            let fallback = format!("ingredients_{}", FALLBACK_LANGUAGE);
            find_column(self.sheet, |c| c.to_lowercase().contains(&fallback))
        })
    }

    /// First column named `cooking` or `cookingtime`, ignoring case
    pub fn cooking_column(&self) -> Option<&'a str> {
        find_column(self.sheet, |c| {
            let c = c.to_lowercase();
            c == "cooking" || c == "cookingtime"
        })
    }

    pub fn cell(&self, column: &str) -> &'a Cell {
        self.sheet.cell(self.row, column)
    }
}

fn find_column<'a>(sheet: &'a Sheet, predicate: impl Fn(&str) -> bool) -> Option<&'a str> {
    sheet
        .columns
        .iter()
        .map(String::as_str)
        .find(|column| predicate(column))
}

/// Finds recipes by name across every sheet of a loaded workbook
#[derive(Debug, Clone)]
pub struct RecipeResolver<'w> {
    workbook: &'w Workbook,
    bindings: &'static [LanguageBinding],
}

impl<'w> RecipeResolver<'w> {
    pub fn new(workbook: &'w Workbook) -> Self {
        Self::with_bindings(workbook, LANGUAGE_BINDINGS)
    }

    pub fn with_bindings(workbook: &'w Workbook, bindings: &'static [LanguageBinding]) -> Self {
        Self { workbook, bindings }
    }

    /// Locate `recipe_name` (trimmed, case-insensitive, exact match).
    ///
    /// Sheets are searched in workbook order. Within a sheet the multilingual
    /// columns come first, then the plain name columns bound to English. The
    /// first hit wins.
    pub fn resolve(&self, recipe_name: &str) -> Option<Resolution<'w>> {
        let query = recipe_name.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let workbook: &'w Workbook = self.workbook;
        for sheet in &workbook.sheets {
            let candidates = self
                .bindings
                .iter()
                .map(|b| (b.name_column, b.code))
                .chain(
                    FALLBACK_NAME_COLUMNS
                        .iter()
                        .map(|column| (*column, FALLBACK_LANGUAGE)),
                );

            for (column, language) in candidates {
                let Some(name_column) = sheet.columns.iter().find(|c| *c == column) else {
                    continue;
                };
                if let Some(row) = find_row(sheet, name_column, &query) {
                    debug!(
                        "Resolved {:?} in sheet {:?} via column {:?} ({})",
                        recipe_name, sheet.name, name_column, language
                    );
                    return Some(Resolution {
                        sheet,
                        name_column,
                        language,
                        row,
                    });
                }
            }
        }

        debug!("No sheet holds a recipe named {:?}", recipe_name);
        None
    }
}

fn find_row<'a>(sheet: &'a Sheet, column: &str, query: &str) -> Option<&'a Row> {
    sheet.rows.iter().find(|row| {
        let cell = sheet.cell(row, column);
        !cell.is_empty() && cell.to_string().trim().to_lowercase() == query
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), Cell::from(*v)))
            .collect()
    }

    #[test]
    fn test_resolve_trims_and_ignores_case() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Breakfast",
            vec![row(&[("name", "pongal"), ("ingredients_en", "2 cup rice")])],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("  Pongal ").unwrap();
        assert_eq!(resolution.sheet.name, "Breakfast");
        assert_eq!(resolution.name_column, "name");
        assert_eq!(resolution.language, "en");
    }

    #[test]
    fn test_resolve_requires_exact_match() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Breakfast",
            vec![row(&[("name", "Ven Pongal")])],
        )]);
        assert!(RecipeResolver::new(&workbook).resolve("pongal").is_none());
    }

    #[test]
    fn test_multilingual_column_wins_over_name_column() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Sweets",
            vec![
                row(&[("name", "payasam"), ("hindiName", "other")]),
                row(&[("name", "kheer"), ("hindiName", "payasam")]),
            ],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("payasam").unwrap();
        assert_eq!(resolution.name_column, "hindiName");
        assert_eq!(resolution.language, "hn");
        assert_eq!(resolution.cell("name"), &Cell::from("kheer"));
    }

    #[test]
    fn test_language_columns_are_tried_in_declaration_order() {
        // hindiName comes first in the sheet, but TamilName is declared first
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![row(&[("hindiName", "kesari"), ("TamilName", "Kesari")])],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("kesari").unwrap();
        assert_eq!(resolution.name_column, "TamilName");
        assert_eq!(resolution.language, "ta");
    }

    #[test]
    fn test_capitalised_tamil_column_wins_over_lowercase() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![
                row(&[("tamilname", "adai"), ("TamilName", "other")]),
                row(&[("tamilname", "other"), ("TamilName", "adai")]),
            ],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("adai").unwrap();
        assert_eq!(resolution.name_column, "TamilName");
        assert_eq!(resolution.cell("tamilname"), &Cell::from("other"));
    }

    #[test]
    fn test_custom_bindings() {
        const GERMAN_ONLY: &[LanguageBinding] = &[binding("germanName", "de")];
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![row(&[
                ("TamilName", "strudel"),
                ("germanName", "Strudel"),
                ("ingredients_de", "2 cup mehl"),
            ])],
        )]);

        let resolution = RecipeResolver::with_bindings(&workbook, GERMAN_ONLY)
            .resolve("strudel")
            .unwrap();
        assert_eq!(resolution.name_column, "germanName");
        assert_eq!(resolution.language, "de");
        assert_eq!(resolution.ingredient_column(), Some("ingredients_de"));

        let default = RecipeResolver::new(&workbook).resolve("strudel").unwrap();
        assert_eq!(default.language, "ta");
    }

    #[test]
    fn test_earlier_sheet_wins() {
        let workbook = Workbook::new(vec![
            Sheet::new("First", vec![row(&[("Name", "Dosa")])]),
            Sheet::new("Second", vec![row(&[("TamilName", "dosa")])]),
        ]);
        let resolution = RecipeResolver::new(&workbook).resolve("dosa").unwrap();
        assert_eq!(resolution.sheet.name, "First");
        assert_eq!(resolution.language, "en");
    }

    #[test]
    fn test_empty_query_and_empty_cells_never_match() {
        let mut blank = Row::new();
        blank.insert("name".to_string(), Cell::Empty);
        let workbook = Workbook::new(vec![Sheet::new("Sheet1", vec![blank])]);
        let resolver = RecipeResolver::new(&workbook);
        assert!(resolver.resolve("").is_none());
        assert!(resolver.resolve("   ").is_none());
    }

    #[test]
    fn test_numeric_names_match_their_text_form() {
        let mut numeric = Row::new();
        numeric.insert("name".to_string(), Cell::Number(7.0));
        let workbook = Workbook::new(vec![Sheet::new("Sheet1", vec![numeric])]);
        assert!(RecipeResolver::new(&workbook).resolve("7").is_some());
    }

    #[test]
    fn test_ingredient_column_discovery() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![row(&[
                ("TamilName", "பொங்கல்"),
                ("Ingredients_EN", "2 cup rice"),
                ("ingredients_ta", "2 cup arisi"),
                ("CookingTime", "30"),
            ])],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("பொங்கல்").unwrap();
        assert_eq!(resolution.ingredient_column(), Some("ingredients_ta"));
        assert_eq!(resolution.cooking_column(), Some("CookingTime"));
    }

    #[test]
    fn test_ingredient_column_falls_back_to_english() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![row(&[("frenchName", "crêpe"), ("ingredients_en_full", "1 cup flour")])],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("Crêpe").unwrap();
        assert_eq!(resolution.language, "french");
        assert_eq!(resolution.ingredient_column(), Some("ingredients_en_full"));
        assert_eq!(resolution.cooking_column(), None);
    }

    #[test]
    fn test_missing_ingredient_column() {
        let workbook = Workbook::new(vec![Sheet::new(
            "Sheet1",
            vec![row(&[("name", "rasam"), ("cooking", "15")])],
        )]);
        let resolution = RecipeResolver::new(&workbook).resolve("rasam").unwrap();
        assert_eq!(resolution.ingredient_column(), None);
    }
}

use crate::data::Dataset;
use crate::palette::ColorMap;
use crate::types::{DerivedView, FilterOptions, MapPoint, Record, Selection};

/// Static dataset plus the color table; everything the dashboard shows is derived from it.
#[derive(Debug, Clone)]
pub struct ViewModel {
    dataset: Dataset,
    colors: ColorMap,
}

impl ViewModel {
    pub fn new(dataset: Dataset, colors: ColorMap) -> Self {
        Self { dataset, colors }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> FilterOptions {
        self.dataset.options()
    }

    /// Filter rows by the selection and project them into map points.
    ///
    /// Recomputed from scratch on every call. Rows keep dataset order and
    /// `points[i]` always describes `rows[i]`.
    pub fn derive_view(&self, selection: &Selection) -> DerivedView<'_> {
        let rows: Vec<&Record> = self
            .dataset
            .records()
            .iter()
            .filter(|record| selection.admits(record))
            .collect();

        let points = rows.iter().map(|record| self.map_point(record)).collect();

        DerivedView { rows, points }
    }

    fn map_point(&self, record: &Record) -> MapPoint {
        MapPoint {
            lat: record.latitude(),
            lon: record.longitude(),
            label: record.place.clone(),
            population: record.population,
            category: record.category.clone(),
            color: self.colors.color_for(&record.category),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::palette::CATEGORY_COLORS;
    use crate::types::NOT_APPLICABLE;
    use std::ptr;

    fn small_model() -> ViewModel {
        let dataset = Dataset::new(vec![
            Record::new("A", "X", 10.0, -90.0, 100, "wind farm"),
            Record::new("B", NOT_APPLICABLE, 20.0, -95.0, 200, "dam"),
        ])
        .unwrap();
        let colors = ColorMap::new(&[("wind farm", "blue"), ("dam", "red")], "gray");
        ViewModel::new(dataset, colors)
    }

    fn builtin_model() -> ViewModel {
        ViewModel::new(Dataset::builtin().unwrap(), CATEGORY_COLORS)
    }

    fn places(view: &DerivedView) -> Vec<String> {
        view.rows.iter().map(|r| r.place.clone()).collect()
    }

    fn all_selections(model: &ViewModel) -> Vec<Selection> {
        let options = model.options();
        let mut place_sets: Vec<Vec<String>> = vec![vec![], vec!["nowhere".to_string()]];
        let mut company_sets: Vec<Vec<String>> = vec![vec![], vec!["nobody".to_string()]];
        for place in &options.places {
            place_sets.push(vec![place.clone()]);
        }
        for company in &options.companies {
            company_sets.push(vec![company.clone()]);
        }
        place_sets.push(options.places.clone());
        company_sets.push(options.companies.clone());
        company_sets.push(vec![options.companies[0].clone(), "nobody".to_string()]);

        let mut selections = Vec::new();
        for p in &place_sets {
            for c in &company_sets {
                selections.push(Selection::new(p.clone(), c.clone()));
            }
        }
        selections
    }

    #[test]
    fn test_no_selection_returns_everything_in_order() {
        let model = builtin_model();
        let view = model.derive_view(&Selection::default());
        assert_eq!(view.rows.len(), model.dataset().len());
        for (row, record) in view.rows.iter().zip(model.dataset().records()) {
            assert!(ptr::eq(*row, record));
        }
    }

    #[test]
    fn test_filter_by_place() {
        let model = small_model();
        let view = model.derive_view(&Selection::new(["A"], Vec::<String>::new()));
        assert_eq!(places(&view), vec!["A"]);
        assert_eq!(view.rows[0].company, "X");
        assert_eq!(view.rows[0].category, "wind farm");
    }

    #[test]
    fn test_unknown_company_yields_nothing() {
        let model = small_model();
        let view = model.derive_view(&Selection::new(Vec::<String>::new(), ["Z"]));
        assert!(view.rows.is_empty());
        assert!(view.points.is_empty());
    }

    #[test]
    fn test_sentinel_company_is_filterable() {
        let model = builtin_model();
        let view = model.derive_view(&Selection::new(Vec::<String>::new(), [NOT_APPLICABLE]));
        assert_eq!(places(&view), vec!["Alvaro Obregón"]);
    }

    #[test]
    fn test_multi_select_keeps_dataset_order() {
        let model = builtin_model();
        let view = model.derive_view(&Selection::new(["Jalcomulco", "La ventosa"], Vec::<String>::new()));
        assert_eq!(places(&view), vec!["La ventosa", "Jalcomulco"]);
    }

    #[test]
    fn test_rows_satisfy_every_non_empty_filter() {
        let model = builtin_model();
        for selection in all_selections(&model) {
            let view = model.derive_view(&selection);
            for row in &view.rows {
                if !selection.places.is_empty() {
                    assert!(selection.places.contains(&row.place));
                }
                if !selection.companies.is_empty() {
                    assert!(selection.companies.contains(&row.company));
                }
            }
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let model = builtin_model();
        for selection in all_selections(&model) {
            let both = model.derive_view(&selection);
            let by_place = model.derive_view(&Selection {
                places: selection.places.clone(),
                companies: Default::default(),
            });
            let by_company = model.derive_view(&Selection {
                places: Default::default(),
                companies: selection.companies.clone(),
            });

            let expected: Vec<&Record> = by_place
                .rows
                .iter()
                .copied()
                .filter(|r| by_company.rows.iter().any(|c| ptr::eq(*c, *r)))
                .collect();

            assert_eq!(both.rows.len(), expected.len());
            for (a, b) in both.rows.iter().zip(&expected) {
                assert!(ptr::eq(*a, *b));
            }
        }
    }

    #[test]
    fn test_derive_view_is_idempotent() {
        let model = builtin_model();
        let selection = Selection::new(["La ventosa", "Jalcomulco"], ["Odebrecht"]);
        assert_eq!(model.derive_view(&selection), model.derive_view(&selection));
    }

    #[test]
    fn test_points_project_rows() {
        let model = small_model();
        let view = model.derive_view(&Selection::default());
        assert_eq!(view.points.len(), view.rows.len());
        for (point, row) in view.points.iter().zip(&view.rows) {
            assert_eq!(point.lat, row.latitude());
            assert_eq!(point.lon, row.longitude());
            assert_eq!(point.label, row.place);
            assert_eq!(point.population, row.population);
            assert_eq!(point.category, row.category);
        }
        assert_eq!(view.points[0].color, "blue");
        assert_eq!(view.points[1].color, "red");
    }

    #[test]
    fn test_unmapped_category_point_gets_fallback_color() {
        let dataset = Dataset::new(vec![Record::new("Q", "X", 0.0, 0.0, 5, "quarry")]).unwrap();
        let model = ViewModel::new(dataset, CATEGORY_COLORS);
        let view = model.derive_view(&Selection::default());
        assert_eq!(view.points[0].color, CATEGORY_COLORS.default_color());
    }
}

//! Row building: one decoded report flattened to named columns.

use crate::constants::{BROKEN_COVER, CONVECTIVE_CLOUDS, columns};
use crate::decoder::quantities::Quantity;
use crate::decoder::{self, DecodeError, DecodedReport};
use crate::models::{Cell, Row};
use std::collections::BTreeMap;

/// Decode `metar` and build its row
pub fn build_row(date: &str, metar: &str) -> Result<Row, DecodeError> {
    let report = decoder::decode(metar)?;
    Ok(decoded_row(date, &report))
}

/// Row for a report the decoder rejected
pub fn failed_row(date: &str, metar: &str) -> Row {
    Row::Failed {
        date: date.to_string(),
        metar: metar.to_string(),
    }
}

/// Flatten a decoded report into a row
pub fn decoded_row(date: &str, report: &DecodedReport) -> Row {
    let mut cells = CellMap::default();

    cells.quantity(columns::PRESSURE, report.press);

    cells.quantity(columns::WIND_DIR, report.wind_dir);
    cells.quantity(columns::WIND_SPEED, report.wind_speed);
    cells.quantity(columns::WIND_GUST, report.wind_gust);
    cells.set(columns::VARIABLE_WIND, Cell::Flag(report.variable_wind));
    cells.quantity(columns::WIND_DIR_FROM, report.wind_dir_from);
    cells.quantity(columns::WIND_DIR_TO, report.wind_dir_to);

    cells.quantity(columns::VISIBILITY, report.vis);
    cells.quantity(columns::VISIBILITY_DIR, report.vis_dir);
    cells.quantity(columns::MAX_VISIBILITY, report.max_vis);
    cells.quantity(columns::MAX_VISIBILITY_DIR, report.max_vis_dir);

    if let Some(runway) = report.runway.first() {
        cells.set(columns::RUNWAY, Cell::Text(runway.name.clone()));
        cells.quantity(columns::RUNWAY_LOW, Some(runway.low));
        cells.quantity(columns::RUNWAY_HIGH, Some(runway.high));
    }

    cells.set(columns::WEATHER, Cell::Phenomena(report.weather.clone()));
    cells.set(columns::RECENT, Cell::Phenomena(report.recent.clone()));

    // Counts broken layers seen so far, starting at 1
    let mut broken = 1;
    for layer in &report.sky {
        if !layer.cover.is_empty() {
            let column = if layer.cover == BROKEN_COVER && broken > 1 {
                columns::BKN_2
            } else {
                layer.cover.as_str()
            };
            cells.quantity(column, layer.height);

            if let Some(cloud) = layer.cloud.as_deref() {
                if CONVECTIVE_CLOUDS.contains(&cloud) {
                    cells.set(cloud, Cell::Number(1.0));
                }
            }

            if layer.cover == BROKEN_COVER {
                broken += 1;
            }
        }

        if let Some(cloud) = layer.cloud.as_deref() {
            if !cells.contains(columns::CLOUD) {
                cells.set(columns::CLOUD, Cell::Text(cloud.to_string()));
            }
        }
    }

    cells.quantity(columns::TEMPERATURE, report.temp);
    cells.quantity(columns::DEW_POINT, report.dewpt);
    cells.quantity(columns::SEA_LEVEL_PRESSURE, report.press_sea_level);

    Row::Decoded {
        date: date.to_string(),
        metar: report.code.clone(),
        cells: cells.0,
    }
}

#[derive(Default)]
struct CellMap(BTreeMap<String, Cell>);

impl CellMap {
    fn set(&mut self, column: &str, cell: Cell) {
        self.0.insert(column.to_string(), cell);
    }

    /// Store the magnitude of a present quantity; absent ones leave the
    /// column empty
    fn quantity(&mut self, column: &str, quantity: Option<Quantity>) {
        match quantity {
            Some(quantity) => self.set(column, Cell::Number(quantity.value())),
            None => {
                self.0.remove(column);
            }
        }
    }

    fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::quantities::Unit;
    use crate::decoder::SkyLayer;

    fn layer(cover: &str, height_ft: Option<f64>, cloud: Option<&str>) -> SkyLayer {
        SkyLayer {
            cover: cover.to_string(),
            height: height_ft.map(|h| Quantity::new(h, Unit::Feet)),
            cloud: cloud.map(str::to_string),
        }
    }

    fn report_with_sky(sky: Vec<SkyLayer>) -> DecodedReport {
        DecodedReport {
            code: "TEST".to_string(),
            sky,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_row_populates_decoded_fields() {
        let row = build_row(
            "2023-01-01T00:00Z",
            "METAR KXYZ 011200Z 00000KT 10SM CLR 20/10 A3000",
        )
        .unwrap();

        assert_eq!(row.status(), "OK");
        assert_eq!(row.date(), "2023-01-01T00:00Z");
        assert_eq!(row.value("V1"), Some(Cell::Number(10.0)));
        assert_eq!(row.value("T"), Some(Cell::Number(20.0)));
        assert_eq!(row.value("TD"), Some(Cell::Number(10.0)));
        assert_eq!(row.value("Q").map(|c| c.render()), Some("30".to_string()));
        assert_eq!(row.value("D").map(|c| c.render()), Some("0".to_string()));
        assert_eq!(row.value("VRB").map(|c| c.render()), Some(String::new()));
        assert_eq!(row.value("WEATHER").map(|c| c.render()), Some(String::new()));
        assert_eq!(row.value("FG"), None);
    }

    #[test]
    fn test_build_row_sea_level_pressure() {
        let row = build_row(
            "d",
            "KBOS 011254Z 27010KT 10SM FEW250 M05/M12 A3012 RMK SLP201",
        )
        .unwrap();
        assert_eq!(row.value("QNH").map(|c| c.render()), Some("1020".to_string()));
        assert_eq!(row.value("T").map(|c| c.render()), Some("-5".to_string()));
        assert_eq!(row.value("FEW").map(|c| c.render()), Some("25000".to_string()));
    }

    #[test]
    fn test_build_row_first_runway_only() {
        let row = build_row(
            "d",
            "EFHK 121650Z 24012KT 0600 R04L/0500V0800 R22R/1000 FG VV001 05/05 Q1010",
        )
        .unwrap();

        assert_eq!(row.value("RUNWAY"), Some(Cell::Text("04L".to_string())));
        assert_eq!(row.value("RUNWAY_LOW"), Some(Cell::Number(500.0)));
        assert_eq!(row.value("RUNWAY_HIGH"), Some(Cell::Number(800.0)));
    }

    #[test]
    fn test_build_row_variable_wind_flag() {
        let row = build_row("d", "LFPG 010930Z VRB03KT CAVOK 15/08 Q1020").unwrap();
        assert_eq!(row.value("VRB"), Some(Cell::Flag(true)));
        assert_eq!(row.value("D"), None);
    }

    #[test]
    fn test_metar_column_keeps_leading_whitespace() {
        use crate::layout::render_row;

        let decoded = build_row("d", "  KXYZ 011200Z 00000KT 10SM CLR 20/10 A3000 ").unwrap();
        let failed = failed_row("d", "  GARBAGE ");

        assert_eq!(render_row(&decoded)[1], "  KXYZ 011200Z 00000KT 10SM CLR 20/10 A3000");
        assert_eq!(render_row(&failed)[1], "  GARBAGE");
    }

    #[test]
    fn test_automatic_station_groups_decode() {
        let row = build_row(
            "d",
            "EGLL 011220Z AUTO 18010KT 9999 R27L////// // SCT030CU 14/09 Q1015 RE//",
        )
        .unwrap();

        assert_eq!(row.status(), "OK");
        assert_eq!(row.value("RUNWAY"), None);
        assert_eq!(row.value("WEATHER").map(|c| c.render()), Some("//".to_string()));
        assert_eq!(row.value("RECENT").map(|c| c.render()), Some("//".to_string()));
        assert_eq!(row.value("SCT"), Some(Cell::Number(3000.0)));
        assert_eq!(row.value("CLOUD"), Some(Cell::Text("CU".to_string())));
        assert_eq!(row.value("TCU"), None);
    }

    #[test]
    fn test_build_row_decode_failure() {
        let err = build_row("2023-01-01", "GARBAGE NOT A METAR").unwrap_err();
        assert!(err.to_string().contains("GARBAGE NOT A METAR"));
    }

    #[test]
    fn test_failed_row_carries_only_identity_columns() {
        let row = failed_row("2023-01-01", "GARBAGE NOT A METAR");
        assert!(row.is_failed());
        assert_eq!(row.value("STATUS"), Some(Cell::Text("Error".to_string())));
        assert_eq!(
            row.value("METAR"),
            Some(Cell::Text("GARBAGE NOT A METAR".to_string()))
        );
        for column in ["D", "F", "V1", "WEATHER", "BKN", "Q", "T"] {
            assert_eq!(row.value(column), None, "column {}", column);
        }
    }

    #[test]
    fn test_second_broken_layer_goes_to_bkn_2() {
        let report = report_with_sky(vec![
            layer("FEW", Some(1500.0), None),
            layer("BKN", Some(3000.0), None),
            layer("BKN", Some(5000.0), None),
        ]);
        let row = decoded_row("d", &report);

        assert_eq!(row.value("FEW"), Some(Cell::Number(1500.0)));
        assert_eq!(row.value("BKN"), Some(Cell::Number(3000.0)));
        assert_eq!(row.value("BKN_2"), Some(Cell::Number(5000.0)));
    }

    #[test]
    fn test_later_broken_layers_overwrite_bkn_2() {
        let report = report_with_sky(vec![
            layer("BKN", Some(1000.0), None),
            layer("BKN", Some(2000.0), None),
            layer("BKN", Some(4000.0), None),
        ]);
        let row = decoded_row("d", &report);

        assert_eq!(row.value("BKN"), Some(Cell::Number(1000.0)));
        assert_eq!(row.value("BKN_2"), Some(Cell::Number(4000.0)));
        assert_eq!(row.value("BKN_3"), None);
    }

    #[test]
    fn test_convective_clouds_and_first_cloud_type() {
        let report = report_with_sky(vec![
            layer("SCT", Some(2000.0), Some("TCU")),
            layer("BKN", Some(3000.0), Some("CB")),
        ]);
        let row = decoded_row("d", &report);

        assert_eq!(row.value("TCU"), Some(Cell::Number(1.0)));
        assert_eq!(row.value("CB"), Some(Cell::Number(1.0)));
        assert_eq!(row.value("CLOUD"), Some(Cell::Text("TCU".to_string())));
    }

    #[test]
    fn test_unknown_cloud_type_is_not_flagged() {
        let report = report_with_sky(vec![layer("OVC", None, Some("///"))]);
        let row = decoded_row("d", &report);

        assert_eq!(row.value("OVC"), None);
        assert_eq!(row.value("///"), None);
        assert_eq!(row.value("CLOUD"), Some(Cell::Text("///".to_string())));
    }

    #[test]
    fn test_weather_columns_join_groups() {
        let row = build_row(
            "d",
            "EGLL 011220Z 18010KT 3000 +TSRA BR SCT010 BKN020TCU 14/13 Q0998 RESHRA",
        )
        .unwrap();

        let weather = row.value("WEATHER").map(|c| c.render()).unwrap();
        assert_eq!(weather, "+TSRA BR");
        assert_eq!(weather.split(' ').count(), 2);
        assert_eq!(row.value("RECENT").map(|c| c.render()), Some("SHRA".to_string()));
        assert_eq!(row.value("TCU"), Some(Cell::Number(1.0)));
    }
}

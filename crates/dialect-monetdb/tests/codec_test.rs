use geodialect_core::{
    Geometry, GeometryFactory, GeometryFormatError, GeometryText, PrecisionModel, Wkt, WktError,
    read_wkt,
    wkt::types::{Coord, Dimension, LineString, MultiLineString, Point},
};
use geodialect_dialect_monetdb::WktCodec;

fn encode(geometry: Option<&Geometry>, srid: i32) -> String {
    let mut sql = String::new();
    WktCodec
        .encode(geometry, srid, &mut sql)
        .expect("geometry should encode");
    sql
}

fn decode(text: &str) -> Geometry {
    WktCodec
        .decode(Some(text), &GeometryFactory::default())
        .expect("decode")
        .expect("non-null geometry")
}

#[test]
fn decode_takes_srid_from_the_factory() {
    let geometry = WktCodec
        .decode(Some("POINT (1 2)"), &GeometryFactory::with_srid(4326))
        .expect("decode")
        .expect("non-null geometry");

    assert_eq!(geometry, read_wkt("POINT (1 2)").expect("point").with_srid(4326));
}

#[test]
fn ewkt_srid_prefix_overrides_the_factory() {
    let geometry = WktCodec
        .decode(Some("SRID=3857;POINT (1 2)"), &GeometryFactory::with_srid(4326))
        .expect("decode")
        .expect("non-null geometry");

    assert_eq!(geometry.srid, Some(3857));
}

#[test]
fn decode_applies_fixed_precision() {
    let factory = GeometryFactory {
        srid: None,
        precision: PrecisionModel::Fixed { scale: 100.0 },
    };

    let geometry = WktCodec
        .decode(Some("LINESTRING (1.23456 2.34567, 3 4)"), &factory)
        .expect("decode")
        .expect("non-null geometry");

    assert_eq!(geometry, read_wkt("LINESTRING (1.23 2.35, 3 4)").expect("rounded line"));
}

#[test]
fn null_values_decode_to_none() {
    let factory = GeometryFactory::default();

    assert_eq!(WktCodec.decode(None, &factory).expect("sql null"), None);
    assert_eq!(WktCodec.decode(Some("NULL"), &factory).expect("null marker"), None);
}

#[test]
fn parse_failures_do_not_echo_the_input() {
    let input = "POLYGON ((0 0, 1 1, secret";

    let error = WktCodec
        .decode(Some(input), &GeometryFactory::default())
        .expect_err("malformed wkt");

    assert!(matches!(
        error,
        GeometryFormatError::Parse {
            target: GeometryText::Geometry,
            source: WktError::Syntax(_),
        }
    ));
    assert!(!error.to_string().contains("secret"));
}

#[test]
fn decoded_text_reencodes_to_equivalent_wkt() {
    let geometry = decode(
        "MULTIPOLYGON (((0 0, 0 1, 1 1, 0 0)), ((5 5, 5 6, 6 6, 5 5), (5.2 5.2, 5.2 5.4, 5.4 5.4, 5.2 5.2)))",
    );

    let sql = encode(Some(&geometry), 0);
    let text = sql
        .strip_prefix("ST_GeomFromText('")
        .and_then(|rest| rest.strip_suffix("', 0)"))
        .unwrap_or_else(|| panic!("unexpected constructor: {sql}"));

    assert_eq!(decode(text), geometry);
}

#[test]
fn null_and_empty_geometries_encode_as_null_keyword() {
    let empty = decode("POLYGON EMPTY");
    let empty_member = Geometry::new(Wkt::MultiLineString(MultiLineString::new(
        vec![LineString::new(Vec::new(), Dimension::XY)],
        Dimension::XY,
    )));

    assert_eq!(encode(None, 4326), "NULL");
    assert_eq!(encode(Some(&empty), 4326), "NULL");
    assert_eq!(encode(Some(&empty_member), 4326), "NULL");
}

#[test]
fn linear_ring_is_degraded_without_touching_the_input() {
    let ring = decode("LINESTRING (0 0, 0 1, 1 1, 0 0)").into_linear_ring();

    assert_eq!(
        encode(Some(&ring), 4326),
        "ST_GeomFromText('LINESTRING(0 0,0 1,1 1,0 0)', 4326)"
    );
    assert!(ring.is_linear_ring());
}

#[test]
fn three_dimensional_points_keep_z() {
    let point = decode("POINT Z (1 2 3.5)");

    assert_eq!(encode(Some(&point), -1), "ST_GeomFromText('POINT Z(1 2 3.5)', -1)");
}

#[test]
fn non_finite_coordinates_fail_instead_of_writing_unreadable_text() {
    let point = Geometry::new(Wkt::Point(Point::new(
        Some(Coord {
            x: f64::NAN,
            y: 1.0,
            z: None,
            m: None,
        }),
        Dimension::XY,
    )));
    let mut sql = String::new();

    let error = WktCodec
        .encode(Some(&point), 4326, &mut sql)
        .expect_err("NaN has no WKT form");

    assert!(matches!(
        error,
        GeometryFormatError::Write {
            source: WktError::NonFinite
        }
    ));
    assert!(sql.is_empty());
}

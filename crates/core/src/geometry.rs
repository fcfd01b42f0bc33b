mod envelope;
mod ewkt;

use wkt::{
    Wkt,
    types::{
        Coord, Dimension, GeometryCollection, LineString, MultiLineString, MultiPoint,
        MultiPolygon, Point, Polygon,
    },
};

pub use envelope::{Envelope, ReferencedEnvelope};
pub use ewkt::{WktError, read_wkt, write_wkt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Geometry,
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    #[must_use]
    pub fn wkt_tag(self) -> &'static str {
        match self {
            Self::Geometry => "GEOMETRY",
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::LinearRing => "LINEARRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Case-insensitive inverse of [`GeometryType::wkt_tag`].
    #[must_use]
    pub fn from_wkt_tag(tag: &str) -> Option<Self> {
        const ALL: [GeometryType; 9] = [
            GeometryType::Geometry,
            GeometryType::Point,
            GeometryType::LineString,
            GeometryType::LinearRing,
            GeometryType::Polygon,
            GeometryType::MultiPoint,
            GeometryType::MultiLineString,
            GeometryType::MultiPolygon,
            GeometryType::GeometryCollection,
        ];

        let tag = tag.trim();
        ALL.into_iter()
            .find(|candidate| candidate.wkt_tag().eq_ignore_ascii_case(tag))
    }
}

/// A parsed geometry plus the SRID it was read or built with. Ring closure is
/// not checked; callers supply closed rings for polygons and linear rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub shape: Wkt<f64>,
    pub srid: Option<i32>,
    linear_ring: bool,
}

impl Geometry {
    #[must_use]
    pub fn new(shape: Wkt<f64>) -> Self {
        Self {
            shape,
            srid: None,
            linear_ring: false,
        }
    }

    /// Axis-aligned rectangle covering `envelope`, as a closed polygon.
    #[must_use]
    pub fn from_envelope(envelope: &Envelope) -> Self {
        let (min_x, min_y) = (envelope.min_x(), envelope.min_y());
        let (max_x, max_y) = (envelope.max_x(), envelope.max_y());
        let ring = [
            (min_x, min_y),
            (min_x, max_y),
            (max_x, max_y),
            (max_x, min_y),
            (min_x, min_y),
        ]
        .into_iter()
        .map(|(x, y)| Coord {
            x,
            y,
            z: None,
            m: None,
        })
        .collect();

        Self::new(Wkt::Polygon(Polygon::new(
            vec![LineString::new(ring, Dimension::XY)],
            Dimension::XY,
        )))
    }

    #[must_use]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Marks a line string as a closed ring. Other shapes are returned as is.
    #[must_use]
    pub fn into_linear_ring(mut self) -> Self {
        self.linear_ring = matches!(self.shape, Wkt::LineString(_));
        self
    }

    #[must_use]
    pub fn is_linear_ring(&self) -> bool {
        self.linear_ring
    }

    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        match &self.shape {
            Wkt::Point(_) => GeometryType::Point,
            Wkt::LineString(_) if self.linear_ring => GeometryType::LinearRing,
            Wkt::LineString(_) => GeometryType::LineString,
            Wkt::Polygon(_) => GeometryType::Polygon,
            Wkt::MultiPoint(_) => GeometryType::MultiPoint,
            Wkt::MultiLineString(_) => GeometryType::MultiLineString,
            Wkt::MultiPolygon(_) => GeometryType::MultiPolygon,
            Wkt::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// True when no member holds a coordinate, however deeply nested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let mut empty = true;
        for_each_coord(&self.shape, &mut |_| empty = false);
        empty
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::null();
        for_each_coord(&self.shape, &mut |coord| {
            envelope.expand_to_include(coord.x, coord.y);
        });
        envelope
    }

    /// Plain WKT for the shape; a linear ring is written as a line string.
    pub fn to_wkt(&self) -> Result<String, WktError> {
        write_wkt(&self.shape)
    }
}

pub(crate) fn for_each_coord<F>(shape: &Wkt<f64>, f: &mut F)
where
    F: FnMut(&Coord<f64>),
{
    match shape {
        Wkt::Point(point) => point_coords(point, f),
        Wkt::LineString(line) => line_coords(line, f),
        Wkt::Polygon(polygon) => polygon_coords(polygon, f),
        Wkt::MultiPoint(points) => {
            for point in points.points() {
                point_coords(point, f);
            }
        }
        Wkt::MultiLineString(lines) => {
            for line in lines.line_strings() {
                line_coords(line, f);
            }
        }
        Wkt::MultiPolygon(polygons) => {
            for polygon in polygons.polygons() {
                polygon_coords(polygon, f);
            }
        }
        Wkt::GeometryCollection(members) => {
            for member in members.geometries() {
                for_each_coord(member, f);
            }
        }
    }
}

fn point_coords<F: FnMut(&Coord<f64>)>(point: &Point<f64>, f: &mut F) {
    if let Some(coord) = point.coord() {
        f(coord);
    }
}

fn line_coords<F: FnMut(&Coord<f64>)>(line: &LineString<f64>, f: &mut F) {
    for coord in line.coords() {
        f(coord);
    }
}

fn polygon_coords<F: FnMut(&Coord<f64>)>(polygon: &Polygon<f64>, f: &mut F) {
    for ring in polygon.rings() {
        line_coords(ring, f);
    }
}

fn map_coords<F>(shape: Wkt<f64>, f: &F) -> Wkt<f64>
where
    F: Fn(Coord<f64>) -> Coord<f64>,
{
    match shape {
        Wkt::Point(point) => Wkt::Point(map_point(point, f)),
        Wkt::LineString(line) => Wkt::LineString(map_line(line, f)),
        Wkt::Polygon(polygon) => Wkt::Polygon(map_polygon(polygon, f)),
        Wkt::MultiPoint(points) => {
            let (points, dim) = points.into_inner();
            let points = points.into_iter().map(|point| map_point(point, f)).collect();
            Wkt::MultiPoint(MultiPoint::new(points, dim))
        }
        Wkt::MultiLineString(lines) => {
            let (lines, dim) = lines.into_inner();
            let lines = lines.into_iter().map(|line| map_line(line, f)).collect();
            Wkt::MultiLineString(MultiLineString::new(lines, dim))
        }
        Wkt::MultiPolygon(polygons) => {
            let (polygons, dim) = polygons.into_inner();
            let polygons = polygons
                .into_iter()
                .map(|polygon| map_polygon(polygon, f))
                .collect();
            Wkt::MultiPolygon(MultiPolygon::new(polygons, dim))
        }
        Wkt::GeometryCollection(members) => {
            let (members, dim) = members.into_inner();
            let members = members
                .into_iter()
                .map(|member| map_coords(member, f))
                .collect();
            Wkt::GeometryCollection(GeometryCollection::new(members, dim))
        }
    }
}

fn map_point<F: Fn(Coord<f64>) -> Coord<f64>>(point: Point<f64>, f: &F) -> Point<f64> {
    let (coord, dim) = point.into_inner();
    Point::new(coord.map(f), dim)
}

fn map_line<F: Fn(Coord<f64>) -> Coord<f64>>(line: LineString<f64>, f: &F) -> LineString<f64> {
    let (coords, dim) = line.into_inner();
    LineString::new(coords.into_iter().map(f).collect(), dim)
}

fn map_polygon<F: Fn(Coord<f64>) -> Coord<f64>>(polygon: Polygon<f64>, f: &F) -> Polygon<f64> {
    let (rings, dim) = polygon.into_inner();
    let rings = rings.into_iter().map(|ring| map_line(ring, f)).collect();
    Polygon::new(rings, dim)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PrecisionModel {
    #[default]
    Floating,
    /// Ordinates are rounded to `1 / scale` units.
    Fixed { scale: f64 },
}

impl PrecisionModel {
    #[must_use]
    pub fn make_precise(self, value: f64) -> f64 {
        match self {
            Self::Floating => value,
            Self::Fixed { scale } => (value * scale).round() / scale,
        }
    }
}

/// Construction context for decoded geometries. Passed explicitly to every
/// decode call instead of being bound to a thread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryFactory {
    pub srid: Option<i32>,
    pub precision: PrecisionModel,
}

impl GeometryFactory {
    #[must_use]
    pub fn with_srid(srid: i32) -> Self {
        Self {
            srid: Some(srid),
            precision: PrecisionModel::Floating,
        }
    }

    /// Snaps X and Y to the precision model and fills in the factory SRID
    /// when the geometry carries none.
    #[must_use]
    pub fn create(&self, geometry: Geometry) -> Geometry {
        let shape = match self.precision {
            PrecisionModel::Floating => geometry.shape,
            precision => map_coords(geometry.shape, &|coord: Coord<f64>| Coord {
                x: precision.make_precise(coord.x),
                y: precision.make_precise(coord.y),
                ..coord
            }),
        };

        Geometry {
            shape,
            srid: geometry.srid.or(self.srid),
            linear_ring: geometry.linear_ring,
        }
    }

    pub fn read_wkt(&self, text: &str) -> Result<Geometry, WktError> {
        read_wkt(text).map(|geometry| self.create(geometry))
    }
}

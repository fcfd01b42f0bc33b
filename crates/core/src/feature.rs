use crate::{GeometryType, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryDescriptor {
    pub name: String,
    pub geometry_type: GeometryType,
    /// EPSG code of the attribute's coordinate reference system, when known.
    pub crs_epsg: Option<i32>,
    /// SRID recorded by the store when the column was discovered.
    pub native_srid: Option<i32>,
    /// Database type name recorded when the column was discovered.
    pub native_type_name: Option<String>,
}

impl GeometryDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, geometry_type: GeometryType) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            crs_epsg: None,
            native_srid: None,
            native_type_name: None,
        }
    }

    #[must_use]
    pub fn with_crs_epsg(mut self, epsg: i32) -> Self {
        self.crs_epsg = Some(epsg);
        self
    }

    #[must_use]
    pub fn with_native_srid(mut self, srid: i32) -> Self {
        self.native_srid = Some(srid);
        self
    }

    #[must_use]
    pub fn with_native_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.native_type_name = Some(type_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDescriptor {
    Geometry(GeometryDescriptor),
    Scalar { name: String, value_type: ValueType },
}

impl AttributeDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Geometry(descriptor) => &descriptor.name,
            Self::Scalar { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureType {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl FeatureType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, descriptor: GeometryDescriptor) -> Self {
        self.attributes.push(AttributeDescriptor::Geometry(descriptor));
        self
    }

    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.attributes.push(AttributeDescriptor::Scalar {
            name: name.into(),
            value_type,
        });
        self
    }

    pub fn geometry_descriptors(&self) -> impl Iterator<Item = &GeometryDescriptor> {
        self.attributes.iter().filter_map(|attribute| match attribute {
            AttributeDescriptor::Geometry(descriptor) => Some(descriptor),
            AttributeDescriptor::Scalar { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hints {
    pub force_2d: bool,
}

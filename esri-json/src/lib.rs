//! Readers and writers for the JSON forms of the `esri-geometry` types.
//!
//! Three encodings are supported:
//! * verbose objects with named members, e.g. `{"x":1,"y":2,"spatialReference":{"wkid":4326}}`,
//! * compact positional arrays, e.g. `[1,2]`, with spatial references written as a bare WKID,
//! * GeoJSON geometry objects and features.
//!
//! Reading auto-detects verbose and compact forms. Input is first read into a
//! [`serde_json::Value`] by a tolerant reader that also accepts unquoted keys and single quoted
//! strings, and the tree is then matched against the known shapes. A value that matches no shape
//! decodes to `Ok(None)`.
//!
//! ```
//! use esri_geometry::{Geometry, Point};
//! use esri_json::{Encoding, JsonDecode, JsonEncode};
//!
//! let geometry = Geometry::from_json_str("{ x: 1.5, y: 2, spatialReference: 4326 }")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(geometry.to_json_string(Encoding::Compact), r#"{"x":1.5,"y":2,"spatialReference":4326}"#);
//!
//! let point = Point::new(1.5, 2.0);
//! assert_eq!(point.to_compact_string(), "1.5,2");
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod feature;
pub mod geojson;
pub mod literal;
pub mod parse;
pub mod reader;

pub use decode::{decode_geometry_as, JsonDecode};
pub use encode::{Encoding, JsonEncode};
pub use error::CodecError;
pub use feature::{Crs, CrsProperties, Feature, GeoJsonFeature, GeoJsonFeatureCollection};
pub use literal::{DataString, ParseStyle};
pub use parse::{parse_extent, parse_point, ParseLiteral};
pub use reader::read_json;

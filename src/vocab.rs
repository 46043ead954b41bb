//! Fixed vocabulary used by the Data Cube encoders.
//!
//! `rdf`, `rdfs` and `xsd` terms come from `oxigraph::model::vocab`; the modules here
//! cover the remaining namespaces.

pub use oxigraph::model::vocab::{rdf, rdfs, xsd};

pub mod qb {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/linked-data/cube#";

    pub const DATA_SET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#DataSet");

    pub const DATA_STRUCTURE_DEFINITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#DataStructureDefinition");

    pub const COMPONENT_SPECIFICATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#ComponentSpecification");

    pub const OBSERVATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#Observation");

    pub const DIMENSION_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#DimensionProperty");

    pub const MEASURE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#MeasureProperty");

    pub const STRUCTURE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#structure");

    pub const COMPONENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#component");

    pub const DIMENSION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#dimension");

    pub const MEASURE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#measure");

    pub const ORDER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#order");

    pub const DATA_SET_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#dataSet");
}

pub mod owl {
    use oxigraph::model::NamedNodeRef;

    pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
}

pub mod dcterms {
    use oxigraph::model::NamedNodeRef;

    pub const MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/modified");

    pub const LICENSE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/license");

    pub const PUBLISHER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/publisher");

    pub const SUBJECT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/subject");

    pub const IDENTIFIER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/identifier");
}

pub mod foaf {
    use oxigraph::model::NamedNodeRef;

    pub const ORGANIZATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Organization");
}

/// Project ontology shared by every converted dataset
pub mod bm {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://benangmerah.net/ontology/";

    pub const REF_AREA: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://benangmerah.net/ontology/refArea");

    pub const REF_PERIOD: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://benangmerah.net/ontology/refPeriod");

    pub const EXTRA: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://benangmerah.net/ontology/extra");
}

/// Default namespace for BPS area codes
pub const BPS_PLACE_NAMESPACE: &str = "http://benangmerah.net/place/idn/bps/";

use async_trait::async_trait;
use kubus::core::descriptor::Organization;
use kubus::core::DatasetDescriptor;
use kubus::sink::StoreSink;
use kubus::sources::{DataSource, RowStream};
use kubus::{Configuration, Pipeline, Result};
use std::io::Cursor;

const CSV: &str = "kode_provinsi,kode_kabkota,tahun,jumlah_penduduk,kategori\n\
32,3201,2019,4900000,kabupaten\n\
32,3201,2020,5000000,kabupaten\n\
32,3271,2020,1100000,kota\n";

struct RegionalSource;

#[async_trait]
impl DataSource for RegionalSource {
    async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor> {
        Ok(DatasetDescriptor {
            name: dataset_id.to_string(),
            title: "Jumlah Penduduk Jawa Barat".to_string(),
            organization: Some(Organization {
                name: "bps".to_string(),
                title: "Badan Pusat Statistik".to_string(),
                description: None,
            }),
            ..DatasetDescriptor::default()
        })
    }

    async fn open_rows(&self, _descriptor: &DatasetDescriptor) -> Result<RowStream> {
        Ok(RowStream::from_reader(Cursor::new(CSV.as_bytes().to_vec())))
    }
}

async fn load() -> StoreSink {
    let mut pipeline = Pipeline::new(Configuration::new("jumlah-penduduk"), RegionalSource);
    let mut sink = StoreSink::new().unwrap();
    pipeline.run(&mut sink).await.unwrap();
    sink
}

#[tokio::test]
async fn test_observations_belong_to_dataset() {
    let sink = load().await;
    let rows = sink
        .select(
            "PREFIX qb: <http://purl.org/linked-data/cube#>
             SELECT ?obs WHERE { ?obs a qb:Observation ; qb:dataSet ?ds . ?ds a qb:DataSet }",
        )
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_measure_values_are_numeric() {
    let sink = load().await;
    let rows = sink
        .select(
            "PREFIX qb: <http://purl.org/linked-data/cube#>
             PREFIX bm: <http://benangmerah.net/ontology/>
             SELECT (SUM(?v) AS ?total) WHERE {
                 ?spec qb:measure ?p .
                 ?obs ?p ?v ; bm:refPeriod ?period .
                 FILTER(STR(?period) = \"2020\")
             }",
        )
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["total"].starts_with("\"6100000"), "{:?}", rows[0]);
}

#[tokio::test]
async fn test_component_orders() {
    let sink = load().await;
    let rows = sink
        .select(
            "PREFIX qb: <http://purl.org/linked-data/cube#>
             SELECT ?component ?order WHERE {
                 ?dsd a qb:DataStructureDefinition ; qb:component ?spec .
                 ?spec qb:order ?order ; qb:dimension|qb:measure ?component .
             } ORDER BY ?order",
        )
        .unwrap();

    let components: Vec<&str> = rows.iter().map(|r| r["component"].as_str()).collect();
    assert_eq!(
        components,
        vec![
            "<http://benangmerah.net/ontology/refArea>",
            "<http://benangmerah.net/ontology/refPeriod>",
            "<http://data.ukp.go.id/dataset/jumlah-penduduk#jumlah_penduduk>",
            "<http://data.ukp.go.id/dataset/jumlah-penduduk#kategori>",
        ]
    );
}

#[tokio::test]
async fn test_area_prefers_municipality() {
    let sink = load().await;
    let rows = sink
        .select(
            "PREFIX bm: <http://benangmerah.net/ontology/>
             SELECT DISTINCT ?area WHERE { ?obs bm:refArea ?area } ORDER BY ?area",
        )
        .unwrap();
    let areas: Vec<&str> = rows.iter().map(|r| r["area"].as_str()).collect();
    assert_eq!(
        areas,
        vec![
            "<http://benangmerah.net/place/idn/bps/3201>",
            "<http://benangmerah.net/place/idn/bps/3271>",
        ]
    );
}

#[tokio::test]
async fn test_publisher_is_loaded() {
    let sink = load().await;
    let rows = sink
        .select(
            "PREFIX dcterms: <http://purl.org/dc/terms/>
             PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
             SELECT ?label WHERE { ?ds dcterms:publisher ?org . ?org rdfs:label ?label }",
        )
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "\"Badan Pusat Statistik\"");
}

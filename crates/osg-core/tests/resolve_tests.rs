use std::collections::HashSet;

use osg_core::graph::{EdgeKind, NodeKind, SchemaGraph};
use osg_core::{parse, resolve};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const EXTERNAL: &str = include_str!("fixtures/external-refs.yaml");

fn resolve_fixture(yaml: &str) -> SchemaGraph {
    let doc = parse::from_yaml(yaml).expect("fixture should parse");
    resolve(&doc)
}

fn render_edges(graph: &SchemaGraph) -> String {
    graph
        .edges
        .iter()
        .map(|e| format!("{} [{}] {}", e.id, e.label, e.kind.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn petstore_nodes() {
    let graph = resolve_fixture(PETSTORE);

    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "Pet", "Cat", "Dog", "BasePet", "Breed", "Tag", "Owner", "Country", "Pets", "Score",
            "Flag",
        ]
    );

    let kind = |id: &str| graph.node(id).unwrap().kind;
    assert_eq!(kind("Pet"), NodeKind::OneOf);
    assert_eq!(kind("Cat"), NodeKind::AllOf);
    assert_eq!(kind("BasePet"), NodeKind::Object);
    assert_eq!(kind("Breed"), NodeKind::Enum);
    assert_eq!(kind("Country"), NodeKind::String);
    assert_eq!(kind("Pets"), NodeKind::Array);
    assert_eq!(kind("Score"), NodeKind::Number);
    assert_eq!(kind("Flag"), NodeKind::Boolean);

    let base = graph.node("BasePet").unwrap();
    assert_eq!(base.property_names, vec!["id", "name", "tags", "owner"]);
    assert_eq!(base.required_names, vec!["id", "name"]);
    assert!(graph.external_nodes().next().is_none());
}

#[test]
fn petstore_edges() {
    let graph = resolve_fixture(PETSTORE);
    insta::assert_snapshot!(render_edges(&graph), @r"
    Pet->Cat [oneOf[0]] composition
    Pet->Dog [oneOf[1]] composition
    Cat->BasePet [allOf[0]] composition
    Dog->BasePet [allOf[0]] composition
    BasePet->Tag [tags[]] reference
    BasePet->Owner [owner] property
    Owner->Country [address.country] reference
    Pets->Pet [items] array_items
    PetAlias->Pet [$ref] reference
    ");
}

#[test]
fn external_refs_become_nodes() {
    let graph = resolve_fixture(EXTERNAL);

    let external: Vec<_> = graph
        .external_nodes()
        .map(|n| (n.id.as_str(), n.label.as_str(), n.external_file_path.as_deref()))
        .collect();
    assert_eq!(
        external,
        vec![
            ("common.yml#User", "User", Some("common.yml")),
            ("address.yaml#Address", "Address", Some("address.yaml")),
            ("catalog.json#Product", "Product", Some("catalog.json")),
            ("money.yaml#Unknown", "Unknown", Some("money.yaml")),
            ("audit.yml#Audit", "Audit", Some("audit.yml")),
        ]
    );
    assert!(
        graph
            .external_nodes()
            .all(|n| n.kind == NodeKind::External && n.is_external)
    );
    assert!(graph.node("Money").is_none());
}

#[test]
fn external_ref_edges() {
    let graph = resolve_fixture(EXTERNAL);
    insta::assert_snapshot!(render_edges(&graph), @r"
    Order->common.yml#User [owner] property
    Order->address.yaml#Address [billing.address] reference
    Order->OrderLine [lines[]] reference
    OrderLine->catalog.json#Product [product] property
    OrderLine->common.yml#User [buyer] property
    Money->money.yaml#Unknown [$ref] external_ref
    Audited->audit.yml#Audit [anyOf[0]] composition
    Audited->Order [anyOf[1]] composition
    ");
}

#[test]
fn resolution_is_deterministic() {
    for fixture in [PETSTORE, EXTERNAL] {
        let first = resolve_fixture(fixture);
        for _ in 0..5 {
            assert_eq!(resolve_fixture(fixture), first);
        }
    }
}

#[test]
fn ids_are_unique() {
    for fixture in [PETSTORE, EXTERNAL] {
        let graph = resolve_fixture(fixture);
        let node_ids: HashSet<_> = graph.nodes.iter().map(|n| &n.id).collect();
        assert_eq!(node_ids.len(), graph.nodes.len());
        let edge_ids: HashSet<_> = graph.edges.iter().map(|e| &e.id).collect();
        assert_eq!(edge_ids.len(), graph.edges.len());
    }
}

#[test]
fn edge_ids_match_endpoints() {
    let graph = resolve_fixture(EXTERNAL);
    for edge in &graph.edges {
        assert_eq!(edge.id, format!("{}->{}", edge.source, edge.target));
    }
}

#[test]
fn json_document_resolves_like_yaml() {
    let json = r##"{
  "components": {
    "schemas": {
      "Zoo": {"type": "array", "items": {"$ref": "#/components/schemas/Animal"}},
      "Animal": {"type": "object", "properties": {"name": {"type": "string"}}}
    }
  }
}"##;
    let graph = resolve(&parse::from_json(json).unwrap());
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edge("Zoo->Animal").unwrap();
    assert_eq!(edge.label, "items");
    assert_eq!(edge.kind, EdgeKind::ArrayItems);
}

#[test]
fn graph_json_shape() {
    let yaml = r##"
components:
  schemas:
    Order:
      type: object
      properties:
        owner:
          $ref: 'common.yml#/components/schemas/User'
"##;
    let graph = resolve_fixture(yaml);
    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "nodes": [
                {
                    "id": "Order",
                    "label": "Order",
                    "kind": "object",
                    "propertyNames": ["owner"],
                    "isExternal": false
                },
                {
                    "id": "common.yml#User",
                    "label": "User",
                    "kind": "external",
                    "description": "External schema from common.yml",
                    "isExternal": true,
                    "externalFilePath": "common.yml"
                }
            ],
            "edges": [
                {
                    "id": "Order->common.yml#User",
                    "source": "Order",
                    "target": "common.yml#User",
                    "label": "owner",
                    "kind": "property"
                }
            ]
        })
    );
}

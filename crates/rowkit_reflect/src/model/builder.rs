use std::collections::VecDeque;

use rowkit_utils::hash::HashMap;

use crate::info::{StructInfo, TypeInfo};
use crate::model::{FieldId, StructField, StructModel};
use crate::tag::{NameFormat, parse_tag};

struct Pending {
    info: &'static StructInfo,
    parent: Option<FieldId>,
    index: Box<[usize]>,
    path: String,
    nullable: bool,
}

/// Builds the model of `info`, or `None` if it is not a structure once
/// optional layers are stripped.
pub(crate) fn build_model(
    info: &'static TypeInfo,
    tag_key: &str,
    format: NameFormat,
) -> Option<StructModel> {
    let root = info.deref_optional();
    let root_struct = root.as_struct()?;

    let mut nodes: Vec<StructField> = Vec::new();
    let mut roots = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(Pending {
        info: root_struct,
        parent: None,
        index: Box::default(),
        path: String::new(),
        nullable: false,
    });

    while let Some(pending) = queue.pop_front() {
        for declared in pending.info.iter() {
            if !declared.is_exported() && !declared.is_embedded() {
                continue;
            }
            let tag = parse_tag(declared.tag(tag_key), declared.name(), format);
            if tag.is_excluded() {
                continue;
            }
            let Some(field_info) = declared.type_info() else {
                continue;
            };

            let target = field_info.deref_optional();
            let nullable = pending.nullable || field_info.is_nullable();
            let embedded = declared.is_embedded() && target.as_struct().is_some();
            let name = if pending.path.is_empty() {
                tag.name().to_owned()
            } else {
                format!("{}.{}", pending.path, tag.name())
            };
            let index: Box<[usize]> = pending
                .index
                .iter()
                .copied()
                .chain([declared.index()])
                .collect();

            let id = FieldId(nodes.len());
            if let TypeInfo::Struct(nested) = target {
                if is_recursive(&nodes, root, pending.parent, target) {
                    log::trace!(
                        "not expanding `{name}` of `{}`: `{}` is already being expanded",
                        root.type_path(),
                        target.type_path(),
                    );
                } else {
                    let path = if embedded && !tag.has_name_override() {
                        pending.path.clone()
                    } else {
                        name.clone()
                    };
                    queue.push_back(Pending {
                        info: nested,
                        parent: Some(id),
                        index: index.clone(),
                        path,
                        nullable,
                    });
                }
            }

            match pending.parent {
                Some(parent) => nodes[parent.0].children.push(id),
                None => roots.push(id),
            }
            nodes.push(StructField {
                id,
                ident: declared.name(),
                name,
                index,
                info: field_info,
                nullable,
                embedded,
                tag,
                parent: pending.parent,
                children: Vec::new(),
            });
        }
    }

    let mut fields: Vec<FieldId> = nodes.iter().map(|field| field.id).collect();
    // Slice ordering is lexicographic with prefixes first.
    fields.sort_by(|a, b| nodes[a.0].index.cmp(&nodes[b.0].index));

    let mut indexes = HashMap::default();
    let mut names = HashMap::default();
    let mut properties = Vec::new();
    for &id in &fields {
        let field = &nodes[id.0];
        indexes.insert(field.index.clone(), id);
        if field.name.is_empty() || field.embedded {
            continue;
        }
        if names.contains_key(field.name.as_str()) {
            log::warn!(
                "`{}` has more than one field named `{}`, keeping the first",
                root.type_path(),
                field.name,
            );
            continue;
        }
        names.insert(field.name.clone(), id);

        let shadowed = field.index.len() > 1
            && field.parent.is_some()
            && has_ancestor(&nodes, field, |ancestor| !ancestor.embedded);
        if !shadowed {
            properties.push(id);
        }
    }

    Some(StructModel {
        ty: *root.ty(),
        nodes,
        roots,
        fields,
        indexes,
        names,
        properties,
    })
}

// The structure being expanded is `target` if it matches the root or any
// ancestor. This catches indirect cycles as well as direct self-reference.
fn is_recursive(
    nodes: &[StructField],
    root: &TypeInfo,
    mut ancestor: Option<FieldId>,
    target: &TypeInfo,
) -> bool {
    if root.type_id() == target.type_id() {
        return true;
    }
    while let Some(id) = ancestor {
        let node = &nodes[id.0];
        if node.info.deref_optional().type_id() == target.type_id() {
            return true;
        }
        ancestor = node.parent;
    }
    false
}

fn has_ancestor(
    nodes: &[StructField],
    field: &StructField,
    predicate: impl Fn(&StructField) -> bool,
) -> bool {
    let mut parent = field.parent;
    while let Some(id) = parent {
        let node = &nodes[id.0];
        if predicate(node) {
            return true;
        }
        parent = node.parent;
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::model::{Mapper, StructModel};

    #[derive(Reflect, Default)]
    struct Audit {
        pub created_by: String,
        pub updated_by: Option<String>,
    }

    #[derive(Reflect, Default)]
    struct Address {
        pub city: String,
    }

    #[derive(Reflect, Default)]
    struct Outer {
        pub id: i64,
        #[reflect(embed)]
        pub audit: Audit,
        #[reflect(embed, tag = "meta")]
        pub renamed: Audit,
        pub address: Option<Address>,
        #[reflect(tag = "-")]
        pub skipped: i32,
        #[allow(dead_code)]
        hidden: i32,
        #[reflect(tag = "label,size=36")]
        pub title: String,
    }

    #[derive(Reflect, Default)]
    struct Node {
        pub value: i32,
        pub next: Option<Box<Node>>,
    }

    #[derive(Reflect, Default)]
    struct Left {
        pub right: Option<Box<Right>>,
    }

    #[derive(Reflect, Default)]
    struct Right {
        pub left: Option<Box<Left>>,
        pub n: i32,
    }

    #[derive(Reflect, Default)]
    struct Named {
        pub name: String,
    }

    #[derive(Reflect, Default)]
    struct Duplicated {
        pub name: String,
        #[reflect(embed)]
        pub inner: Named,
    }

    fn outer() -> std::sync::Arc<StructModel> {
        Mapper::new().model_of::<Outer>().unwrap()
    }

    fn property_names(model: &StructModel) -> Vec<&str> {
        model.properties().map(|f| f.name()).collect()
    }

    #[test]
    fn properties_promote_embedded_fields() {
        let model = outer();
        assert_eq!(
            property_names(&model),
            [
                "id",
                "created_by",
                "updated_by",
                "meta.created_by",
                "meta.updated_by",
                "address",
                "label",
            ]
        );
    }

    #[test]
    fn fields_are_sorted_by_index() {
        let model = outer();
        let indexes: Vec<Vec<usize>> = model.fields().map(|f| f.index().to_vec()).collect();
        assert_eq!(
            indexes,
            [
                vec![0],
                vec![1],
                vec![1, 0],
                vec![1, 1],
                vec![2],
                vec![2, 0],
                vec![2, 1],
                vec![3],
                vec![3, 0],
                vec![6],
            ]
        );
    }

    #[test]
    fn lookup_by_flattened_name() {
        let model = outer();
        assert_eq!(model.lookup("created_by").unwrap().index(), [1, 0]);
        assert_eq!(model.lookup("address.city").unwrap().index(), [3, 0]);
        // Embedded structures are only reachable by index.
        assert!(model.lookup("audit").is_none());
        assert!(model.lookup("meta").is_none());
        assert!(model.field_by_index(&[1]).unwrap().is_embedded());
        assert!(model.lookup("skipped").is_none());
        assert!(model.lookup("hidden").is_none());
    }

    #[test]
    fn property_lookup_excludes_nested_fields() {
        let model = outer();
        assert_eq!(model.lookup_property("created_by").unwrap().index(), [1, 0]);
        assert_eq!(model.lookup_property("address").unwrap().index(), [3]);
        assert!(model.lookup_property("address.city").is_none());
        assert!(model.lookup_property("audit").is_none());
    }

    #[test]
    fn tag_options_are_kept() {
        let model = outer();
        let label = model.lookup("label").unwrap();
        assert_eq!(label.ident(), "title");
        assert_eq!(label.tag().get("size"), Some("36"));
        assert!(label.ty().is::<String>());
    }

    #[test]
    fn nullability_propagates_to_children() {
        let model = outer();
        assert!(!model.lookup("created_by").unwrap().is_nullable());
        assert!(model.lookup("updated_by").unwrap().is_nullable());
        assert!(model.lookup("address").unwrap().is_nullable());
        assert!(model.lookup("address.city").unwrap().is_nullable());
    }

    #[test]
    fn traversal_follows_declaration_indices() {
        let model = outer();
        assert_eq!(model.get_by_traversal(&[3, 0]).unwrap().name(), "address.city");
        assert_eq!(model.get_by_traversal(&[6]).unwrap().name(), "label");
        assert!(model.get_by_traversal(&[]).is_none());
        assert!(model.get_by_traversal(&[4]).is_none());
        assert!(model.get_by_traversal(&[0, 0]).is_none());
    }

    #[test]
    fn parents_and_children() {
        let model = outer();
        let city = model.lookup("address.city").unwrap();
        let address = model.parent_of(city).unwrap();
        assert_eq!(address.name(), "address");
        assert_eq!(model.children_of(address).count(), 1);

        let promoted = model.lookup("meta.created_by").unwrap();
        assert!(model.parent_by_traversal(promoted, |p| !p.is_embedded()).is_none());
        assert_eq!(
            model.parent_by_traversal(city, |p| !p.is_embedded()).unwrap().id(),
            address.id()
        );
        assert_eq!(model.root_fields().count(), 5);
    }

    #[test]
    fn self_reference_is_not_expanded() {
        let model = Mapper::new().model_of::<Node>().unwrap();
        assert_eq!(property_names(&model), ["value", "next"]);
        assert!(model.lookup("next").unwrap().children().is_empty());
        assert_eq!(model.fields().len(), 2);
    }

    #[test]
    fn indirect_cycle_is_not_expanded() {
        let model = Mapper::new().model_of::<Left>().unwrap();
        let names: Vec<&str> = model.fields().map(|f| f.name()).collect();
        assert_eq!(names, ["right", "right.left", "right.n"]);
        assert!(model.lookup("right.left").unwrap().children().is_empty());
        assert_eq!(property_names(&model), ["right"]);
    }

    #[test]
    fn first_duplicate_name_wins() {
        let model = Mapper::new().model_of::<Duplicated>().unwrap();
        assert_eq!(property_names(&model), ["name"]);
        assert_eq!(model.lookup("name").unwrap().index(), [0]);
    }

    #[test]
    fn non_structures_have_no_model() {
        let mapper = Mapper::new();
        assert!(mapper.model_of::<i32>().is_none());
        assert!(mapper.model_of::<Vec<Outer>>().is_none());
        assert_eq!(mapper.cached_len(), 0);
    }
}

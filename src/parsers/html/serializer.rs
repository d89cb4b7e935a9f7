use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

fn serialize_with_scope(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };

    // Writing into a Vec cannot fail
    if serialize(&mut buf, &serializable, opts).is_err() {
        return String::new();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// 序列化整个文档
pub fn serialize_document(dom: &RcDom) -> String {
    serialize_with_scope(&dom.document, TraversalScope::ChildrenOnly(None))
}

/// 序列化节点本身及其子树（对应 outerHTML）
pub fn serialize_node(node: &Handle) -> String {
    serialize_with_scope(node, TraversalScope::IncludeNode)
}

/// 只序列化子节点（对应 innerHTML）
pub fn serialize_children(node: &Handle) -> String {
    serialize_with_scope(node, TraversalScope::ChildrenOnly(None))
}

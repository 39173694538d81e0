//! Encoding round trips over arbitrary references

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vref_codec::prelude::*;
use vref_codec::{from_node_ref, to_node_ref, Codec, HashCodec, PlainCodec, ZeroCodec};
use vref_model::{NodeRefError, StoreRef};
use vref_test_utils::{
    arb_any_reference, arb_reference, create_document_reference, create_vanilla_reference,
    create_virtual_reference, node_refs, TestStores,
};

proptest! {
    #[test]
    fn plain_roundtrip(reference in arb_reference()) {
        let encoded = PlainCodec.stringify(&reference).unwrap();
        prop_assert_eq!(PlainCodec.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn zero_roundtrip(reference in arb_reference()) {
        let encoded = ZeroCodec.stringify(&reference).unwrap();
        prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.".contains(&b)));
        prop_assert_eq!(ZeroCodec.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn hash_roundtrip(reference in arb_reference()) {
        let stores = TestStores::seeded();
        let codec = HashCodec::with_stores(&stores.classpath, &stores.repository);
        let encoded = codec.stringify(&reference).unwrap();
        prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.~".contains(&b)));
        prop_assert_eq!(codec.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn registry_detects_every_encoding(reference in arb_reference()) {
        for encoding in Encoding::ALL {
            let encoded = reference.encode_as(encoding).unwrap();
            prop_assert_eq!(parse(&encoded).unwrap(), reference.clone());
        }
    }

    #[test]
    fn encodes_losslessly_or_not_at_all(reference in arb_any_reference()) {
        let writable = node_refs(&reference).iter().all(|node| node.validate().is_ok());
        let stores = TestStores::seeded();
        let hash = HashCodec::with_stores(&stores.classpath, &stores.repository);
        let codecs: [&dyn Codec; 3] = [&PlainCodec, &ZeroCodec, &hash];
        for codec in codecs {
            match codec.stringify(&reference) {
                Ok(encoded) => {
                    prop_assert!(writable, "{} wrote an unwritable node: {}", codec.encoding(), encoded);
                    prop_assert_eq!(codec.parse(&encoded).unwrap(), reference.clone());
                }
                Err(e) => {
                    prop_assert!(!writable, "{}: {}", codec.encoding(), e);
                    prop_assert!(matches!(e, CodecError::NodeRef(_)), "{}", e);
                }
            }
        }
    }

    #[test]
    fn hash_is_never_longer_than_zero_for_seeded_templates(path in "(/[0-9]{1,3}){0,4}") {
        let reference = create_virtual_reference(if path.is_empty() { "/" } else { &path });
        let zero = reference.encode_as(Encoding::Zero).unwrap();
        let hash = reference.encode_as(Encoding::Hash).unwrap();
        prop_assert!(hash.len() < zero.len());
    }
}

#[test]
fn fixtures_roundtrip_through_every_encoding() {
    let folder = create_virtual_reference("/1/3");
    let references = [
        folder.clone(),
        create_document_reference(folder),
        create_vanilla_reference("/2"),
        create_document_reference(create_vanilla_reference("/")),
    ];
    for reference in references {
        for encoding in Encoding::ALL {
            let encoded = reference.encode_as(encoding).unwrap();
            assert_eq!(parse(&encoded).unwrap(), reference);
        }
    }
}

#[test]
fn convert_chain_returns_to_start() {
    let reference = create_document_reference(create_virtual_reference("/4/1"));
    let hash = reference.encode().unwrap();
    let plain = convert(&hash, Encoding::Plain).unwrap();
    let zero = convert(&plain, Encoding::Zero).unwrap();
    assert_eq!(convert(&zero, Encoding::Hash).unwrap(), hash);
}

#[test]
fn navigation_survives_encoding() {
    let folder = create_virtual_reference("/1");
    let child = VirtualProtocol::child_reference(&folder, "7").unwrap();
    let decoded = parse(&child.encode().unwrap()).unwrap();

    assert_eq!(
        VirtualProtocol::template_path(&decoded).unwrap().to_string(),
        "/1/7"
    );
    let parent = VirtualProtocol::parent_reference(&decoded).unwrap().unwrap();
    assert_eq!(parent, folder);
}

#[test]
fn virtual_node_ids_roundtrip() {
    let document = create_document_reference(create_virtual_reference("/2"));
    let node = to_node_ref(&document, &StoreRef::workspace_spaces_store(), &CodecConfig::new()).unwrap();
    let reparsed: NodeRef = node.to_string().parse().unwrap();
    let config = CodecConfig::new();
    assert_eq!(from_node_ref(&reparsed, &config).unwrap(), document);
    assert_eq!(
        NodeProtocol::virtual_parent(&document).unwrap(),
        NodeProtocol::virtual_parent(&from_node_ref(&reparsed, &config).unwrap()).unwrap()
    );
}

#[test]
fn rejects_deep_nesting() {
    let mut reference = create_virtual_reference("/");
    for _ in 0..vref_codec::DEFAULT_MAX_DEPTH {
        reference = create_document_reference(reference);
    }
    for encoding in Encoding::ALL {
        let encoded = reference.encode_as(encoding).unwrap();
        assert!(matches!(
            parse(&encoded),
            Err(CodecError::DepthExceeded { .. })
        ));
        assert!(CodecRegistry::global()
            .parse_with_depth(&encoded, reference.depth())
            .is_ok());
    }
}

#[test]
fn store_identifier_with_slash_fails_in_every_encoding() {
    let reference = NodeProtocol::new_reference(
        NodeRef::new(StoreRef::new("avm", "a/b"), "c"),
        create_virtual_reference("/"),
    );
    for encoding in Encoding::ALL {
        assert!(matches!(
            reference.encode_as(encoding),
            Err(CodecError::NodeRef(NodeRefError::InvalidStore(_)))
        ));
    }
}

#[test]
fn empty_node_id_fails_in_every_encoding() {
    let reference = Reference::new(
        Protocol::Node,
        Resource::node(NodeRef::in_spaces_store("")),
        Vec::new(),
    );
    for encoding in Encoding::ALL {
        assert!(matches!(
            reference.encode_as(encoding),
            Err(CodecError::NodeRef(NodeRefError::MissingId(_)))
        ));
    }
    assert!(matches!(
        convert("3-n-w-0", Encoding::Zero),
        Err(CodecError::NodeRef(NodeRefError::MissingId(_)))
    ));
}

#[test]
fn odd_characters_in_nodes_roundtrip() {
    let node = NodeRef::try_new(StoreRef::try_new("avm", "x:%y").unwrap(), "a/b:c%d").unwrap();
    let reference = NodeProtocol::new_reference(node, create_virtual_reference("/1"));
    for encoding in Encoding::ALL {
        let encoded = reference.encode_as(encoding).unwrap();
        assert_eq!(parse(&encoded).unwrap(), reference);
    }
}

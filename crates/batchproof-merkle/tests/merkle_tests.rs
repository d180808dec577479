//! Tree construction, proof generation and verification across tree shapes

use batchproof_merkle::{
    build_tree, create_proof, hash_content, hash_pair, verify_proof, Error, MerkleTree, Proof,
    ProofStep, Sha256Hash, TreeId,
};
use rstest::rstest;

fn leaves(n: usize) -> Vec<Sha256Hash> {
    (0..n)
        .map(|i| hash_content(format!("file-{}", i).as_bytes()))
        .collect()
}

fn flip_bit(hash: &Sha256Hash, bit: usize) -> Sha256Hash {
    let mut bytes = *hash.as_bytes();
    bytes[bit / 8] ^= 1 << (bit % 8);
    Sha256Hash::from_bytes(bytes)
}

#[rstest]
fn test_every_leaf_proves(
    #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 31, 33)] n: usize,
) {
    let leaves = leaves(n);
    let tree = build_tree(&leaves).unwrap();
    let root = tree.root_hash();

    for leaf in &leaves {
        let proof = create_proof(&tree, leaf).unwrap();
        assert_eq!(proof.len() as u32, tree.height());
        assert!(verify_proof(&root, leaf, &proof), "proof failed for {}", leaf);
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(128)]
#[case(255)]
fn test_flipped_bits_fail(#[case] bit: usize) {
    let leaves = leaves(6);
    let tree = build_tree(&leaves).unwrap();
    let root = tree.root_hash();

    for leaf in &leaves {
        let proof = tree.prove(leaf).unwrap();

        assert!(!verify_proof(&root, &flip_bit(leaf, bit), &proof));

        for i in 0..proof.len() {
            let mut steps = proof.clone().into_steps();
            steps[i].hash = flip_bit(&steps[i].hash, bit);
            assert!(
                !verify_proof(&root, leaf, &Proof::new(steps)),
                "tampered step {} still verified",
                i
            );
        }
    }
}

#[test]
fn test_single_leaf_root() {
    let h = hash_content(b"only");
    let tree = build_tree(&[h]).unwrap();
    assert_eq!(tree.root_hash(), h);
}

#[test]
fn test_two_leaf_root() {
    let [h1, h2] = [hash_content(b"1"), hash_content(b"2")];
    let tree = build_tree(&[h1, h2]).unwrap();
    assert_eq!(tree.root_hash(), hash_pair(&h1, &h2));
}

#[test]
fn test_three_leaf_root_duplicates_last() {
    let [h1, h2, h3] = [hash_content(b"1"), hash_content(b"2"), hash_content(b"3")];
    let tree = build_tree(&[h1, h2, h3]).unwrap();
    assert_eq!(
        tree.root_hash(),
        hash_pair(&hash_pair(&h1, &h2), &hash_pair(&h3, &h3))
    );
}

#[test]
fn test_five_leaf_root_duplicates_on_each_odd_level() {
    let l = leaves(5);
    let tree = build_tree(&l).unwrap();

    let a = hash_pair(&l[0], &l[1]);
    let b = hash_pair(&l[2], &l[3]);
    let c = hash_pair(&l[4], &l[4]);
    let ab = hash_pair(&a, &b);
    let cc = hash_pair(&c, &c);
    assert_eq!(tree.root_hash(), hash_pair(&ab, &cc));
}

#[test]
fn test_empty_input() {
    assert_eq!(build_tree(&[]).unwrap_err(), Error::EmptyInput);
}

#[test]
fn test_missing_hash() {
    let tree = build_tree(&leaves(4)).unwrap();
    let absent = hash_content(b"not uploaded");
    assert_eq!(tree.prove(&absent), Err(Error::HashNotFound(absent)));
}

#[test]
fn test_proof_from_another_tree_fails() {
    let leaves_a = leaves(4);
    let tree_a = build_tree(&leaves_a).unwrap();
    let tree_b = build_tree(&leaves(5)).unwrap();

    let proof = tree_a.prove(&leaves_a[1]).unwrap();
    assert!(!verify_proof(&tree_b.root_hash(), &leaves_a[1], &proof));
}

#[test]
fn test_upload_batch_flow() {
    let files: Vec<Vec<u8>> = vec![b"report.pdf".to_vec(), b"photo.jpg".to_vec(), b"notes.txt".to_vec()];
    let id = TreeId::new_v4();
    let tree = MerkleTree::from_contents(id, &files).unwrap();
    let recorded_root = tree.root_hash();

    // The client later re-hashes one downloaded file and checks it with the
    // proof served for it and the root it recorded at upload time.
    let downloaded = hash_content(&files[2]);
    let proof = tree.prove(&downloaded).unwrap();
    assert!(verify_proof(&recorded_root, &downloaded, &proof));

    let corrupted = hash_content(b"notes.txt (modified)");
    assert!(!verify_proof(&recorded_root, &corrupted, &proof));
}

#[test]
fn test_proof_json_shape() {
    let l = leaves(2);
    let tree = build_tree(&l).unwrap();
    let proof = tree.prove(&l[0]).unwrap();

    let json = serde_json::to_value(&proof).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "hash": l[1].to_hex(), "isLeftSibling": false }])
    );

    let back: Proof = serde_json::from_value(json).unwrap();
    assert_eq!(back, proof);
    assert_eq!(back.steps(), &[ProofStep::right(l[1])]);
}

use sigil_key::{KeyHandle, KeyManager, Signer, SoftwareProvider};

#[test]
fn masked_key_survives_export_and_import() {
    let km = KeyManager::new(SoftwareProvider);
    let signer = Signer::new(SoftwareProvider);

    let pair = km.generate_key_pair().unwrap();
    let armor = km.export_private_key(&pair.private_key, "correct-horse").unwrap();

    let restored = km.import_private_key(&armor, "correct-horse").unwrap();
    assert!(restored.usages().can_sign());

    let sig = signer.sign_text(&restored, "transfer:100").unwrap();
    let public_key = km.derive_public_key(&restored).unwrap();
    assert!(signer.verify_text(&public_key, "transfer:100", &sig).unwrap());
    assert!(signer
        .verify_text(&pair.public_key, "transfer:100", &sig)
        .unwrap());
    assert!(!signer.verify_text(&public_key, "transfer:101", &sig).unwrap());
}

#[test]
fn wrong_password_is_an_import_failure() {
    let km = KeyManager::new(SoftwareProvider);
    let pair = km.generate_key_pair().unwrap();
    let armor = km.export_private_key(&pair.private_key, "correct-horse").unwrap();

    let err = km.import_private_key(&armor, "wrong-horse").unwrap_err();
    assert!(err.is_import_failure(), "unexpected error: {err}");
}

#[test]
fn exported_public_key_round_trips() {
    let km = KeyManager::new(SoftwareProvider);
    let signer = Signer::new(SoftwareProvider);
    let pair = km.generate_key_pair().unwrap();

    let pem = km.export_public_key(&pair.public_key).unwrap();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
    let imported = km.import_public_key(&pem).unwrap();
    assert_eq!(km.export_public_key(&imported).unwrap(), pem);

    let sig = signer.sign_text(&pair.private_key, "hello").unwrap();
    assert!(signer.verify_text(&imported, "hello", &sig).unwrap());
}

#[test]
fn reexport_under_new_password() {
    let km = KeyManager::new(SoftwareProvider);
    let pair = km.generate_key_pair().unwrap();

    let first = km.export_private_key(&pair.private_key, "old").unwrap();
    let key = km.import_private_key(&first, "old").unwrap();
    let second = km.export_private_key(&key, "new").unwrap();
    assert_ne!(first, second);

    let key = km.import_private_key(&second, "new").unwrap();
    assert_eq!(
        km.export_public_key(&km.derive_public_key(&key).unwrap())
            .unwrap(),
        km.export_public_key(&pair.public_key).unwrap()
    );
}

#[test]
fn reimported_key_signs_identically() {
    let km = KeyManager::new(SoftwareProvider);
    let signer = Signer::new(SoftwareProvider);
    let pair = km.generate_key_pair().unwrap();

    let armor = km.export_private_key(&pair.private_key, "correct-horse").unwrap();
    let restored = km.import_private_key(&armor, "correct-horse").unwrap();

    // RFC 6979 nonces make the signature a function of key and message
    assert_eq!(
        signer.sign_text(&pair.private_key, "transfer:100").unwrap(),
        signer.sign_text(&restored, "transfer:100").unwrap()
    );
}

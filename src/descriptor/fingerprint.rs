// src/descriptor/fingerprint.rs

use blake3::Hasher;

use crate::descriptor::Descriptor;

/// Hash every observable part of a descriptor.
///
/// Fields are length-prefixed so that adjacent values cannot run into each
/// other (`"AB" + "C"` and `"A" + "BC"` hash differently). Environment
/// variables are hashed in insertion order, which is deterministic for a
/// given set of resolver responses.
pub fn compute(descriptor: &Descriptor) -> String {
    let mut hasher = Hasher::new();

    update_field(&mut hasher, descriptor.command().to_string_lossy().as_bytes());
    update_field(
        &mut hasher,
        descriptor.working_directory().to_string_lossy().as_bytes(),
    );
    hasher.update(&descriptor.idle_timeout().as_millis().to_le_bytes());

    hasher.update(&(descriptor.environment().len() as u64).to_le_bytes());
    for (key, value) in descriptor.environment() {
        update_field(&mut hasher, key.as_bytes());
        update_field(&mut hasher, value.as_bytes());
    }

    hasher.update(&(descriptor.search_path_prefix().len() as u64).to_le_bytes());
    for dir in descriptor.search_path_prefix() {
        update_field(&mut hasher, dir.to_string_lossy().as_bytes());
    }

    hasher.finalize().to_hex().to_string()
}

fn update_field(hasher: &mut Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

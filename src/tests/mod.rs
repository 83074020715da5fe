use std::path::PathBuf;

use crate::{load_file, load_memory, Scene};

mod import;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn testcase(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testcases")
        .join(name)
}

pub fn load_testcase(name: &str) -> Scene {
    init_logger();
    load_file(testcase(name)).unwrap()
}

/// Wrap `objects` and `connections` records into a minimal ASCII document.
pub fn ascii_document(objects: &str, connections: &str) -> String {
    format!(
        "; FBX 7.4.0 project file\n\
         FBXHeaderExtension:  {{\n\tFBXVersion: 7400\n}}\n\
         Objects:  {{\n{}\n}}\n\
         Connections:  {{\n{}\n}}\n",
        objects, connections
    )
}

pub fn load_ascii(objects: &str, connections: &str) -> Scene {
    init_logger();
    load_memory(ascii_document(objects, connections).as_bytes()).unwrap()
}

#[test]
fn scenario() {
    let scene = load_testcase("scenario.fbx");
    println!("{:?}", scene.handle().root_node());

    assert_eq!(scene.nodes().len(), 2);
    assert_eq!(scene.meshes().len(), 1);
    assert_eq!(scene.meshes()[0].num_triangles, 2);
    assert_eq!(scene.meshes()[0].num_indices, 6);
    assert_eq!(scene.lights()[0].light_type, crate::scene::LightType::Point);
    assert_eq!(
        scene.cameras()[0].projection_mode,
        crate::scene::ProjectionMode::Perspective
    );
}

#[test]
fn missing_file() {
    init_logger();
    let err = load_file(testcase("does-not-exist.fbx")).unwrap_err();
    assert!(matches!(err, crate::Error::FileNotFound { .. }));
    let message = err.to_string();
    assert!(!message.is_empty());
    assert!(message.contains("does-not-exist.fbx"));
}

#[test]
fn scenes_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Scene>();
    assert_send_sync::<crate::SceneHandle<'static>>();
}

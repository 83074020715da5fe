use glam::{DAffine3, DVec3, Vec2, Vec3, Vec4};

use super::{ascii_document, init_logger, load_ascii, load_testcase, testcase};
use crate::error::Error;
use crate::options::{IndexErrorHandling, LoadOptions};
use crate::scene::node::column_major;
use crate::scene::{
    ApertureMode, AspectMode, CoordinateAxis, LightAreaShape, LightDecay, LightType, NodeId,
    ProjectionMode, Scene, SkinningMethod, TextureType, WrapMode,
};
use crate::load_memory_with;

const EPSILON: f64 = 1e-9;

fn assert_close(a: DVec3, b: DVec3) {
    assert!((a - b).length() < 1e-6, "{:?} != {:?}", a, b);
}

fn assert_tree(scene: &Scene) {
    let roots: Vec<_> = scene.nodes().iter().filter(|n| n.parent.is_none()).collect();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].is_root());
    assert_eq!(roots[0].id, scene.root());

    for node in scene.nodes().iter().skip(1) {
        assert!(!node.is_root());
        // Terminates and ends at the root.
        let chain: Vec<_> = scene.ancestors(node.id).collect();
        assert!(chain.len() < scene.nodes().len());
        assert!(chain.last().unwrap().is_root());

        let parent = &scene[node.parent.unwrap()];
        assert!(parent.children.contains(&node.id));
        let expected = parent.node_to_world * node.node_to_parent;
        assert!(node.node_to_world.abs_diff_eq(expected, EPSILON));
    }
    assert_eq!(scene.root_node().node_to_world, DAffine3::IDENTITY);
}

#[test]
fn scenario_scene() {
    let scene = load_testcase("scenario.fbx");
    assert_tree(&scene);

    let root = scene.root_node();
    assert_eq!(root.name, "");
    assert_eq!(root.children.len(), 1);

    let quad = &scene[root.children[0]];
    assert_eq!(quad.name, "Quad");
    assert_eq!(quad.world_transform()[12..16], [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(quad.world_transform()[3], 0.0);
    assert_eq!(quad.world_transform()[7], 0.0);
    assert_eq!(quad.world_transform()[11], 0.0);

    let mesh = &scene[quad.mesh.unwrap()];
    assert_eq!(mesh.name, "Quad");
    assert_eq!(mesh.num_vertices, 4);
    assert_eq!(mesh.num_faces, 2);
    assert_eq!(mesh.faces[1].index_begin, 3);
    assert_eq!(mesh.vertex_position.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(mesh.vertex_normal.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(mesh.vertex_normal.get(4), Some(Vec3::Z));
    assert_eq!(mesh.vertex_uv.get(5), Some(Vec2::new(0.0, 1.0)));
    assert!(!mesh.vertex_tangent.exists());
    assert!(!mesh.vertex_color.exists());
    assert_eq!(mesh.face_material, vec![0, 0]);
    assert_eq!(mesh.instances, vec![quad.id]);
    assert_eq!(mesh.materials, quad.materials);
    assert_eq!(scene[mesh.materials[0]].name, "Paint");
    assert_eq!(scene[mesh.materials[0]].shading_model, "phong");
    for &index in mesh.vertex_position.indices.iter() {
        assert!((index as usize) < mesh.vertex_position.values.len());
    }

    let light = &scene[quad.light.unwrap()];
    assert_eq!(light.name, "Lamp");
    assert_eq!(light.light_type, LightType::Point);
    assert_eq!(light.color, Vec3::new(1.0, 0.5, 0.25));
    assert!((light.intensity - 1.5).abs() < EPSILON);
    assert_eq!(light.local_direction, Vec3::NEG_Y);
    assert_eq!(light.decay, LightDecay::Quadratic);
    assert_eq!(light.area_shape, LightAreaShape::Rectangle);
    assert_eq!(light.outer_angle, 45.0);
    assert!(light.cast_light);
    assert!(!light.cast_shadows);

    let camera = &scene[quad.camera.unwrap()];
    assert_eq!(camera.projection_mode, ProjectionMode::Perspective);
    assert_eq!(camera.aspect_mode, AspectMode::FixedResolution);
    assert_eq!(camera.aperture_mode, ApertureMode::Vertical);
    assert!(camera.resolution_is_pixels);
    assert_eq!(camera.resolution.x, 1920.0);
    assert!((camera.aspect_ratio - 1920.0 / 1080.0).abs() < EPSILON);
    assert!((camera.field_of_view_deg.y - 60.0).abs() < EPSILON);
    let tan_y = 30f64.to_radians().tan();
    assert!((camera.field_of_view_tan.y - tan_y).abs() < EPSILON);
    assert!((camera.field_of_view_tan.x - tan_y * camera.aspect_ratio).abs() < EPSILON);
    assert_eq!(camera.orthographic_extent, 30.0);
    assert_eq!(camera.near_plane, 10.0);
    assert_eq!(camera.far_plane, 4000.0);

    let settings = scene.settings();
    assert_eq!(settings.axes.right, CoordinateAxis::PositiveX);
    assert_eq!(settings.axes.up, CoordinateAxis::PositiveY);
    assert_eq!(settings.axes.front, CoordinateAxis::PositiveZ);
    assert!((settings.unit_meters - 0.01).abs() < EPSILON);
    assert_eq!(scene.metadata().creator, "fbxscene fixture writer");
    assert_eq!(scene.metadata().version, 7400);
}

#[test]
fn rig_hierarchy() {
    let scene = load_testcase("rig.fbx");
    assert_tree(&scene);
    assert_eq!(scene.nodes().len(), 6);

    let names: Vec<_> = scene
        .root_node()
        .children
        .iter()
        .map(|&c| scene[c].name.as_str())
        .collect();
    assert_eq!(names, vec!["Hips", "Prop"]);

    let hips = scene.find_node("Hips").unwrap();
    let spine = scene.find_node("Spine").unwrap();
    let head = scene.find_node("Head").unwrap();
    assert_eq!(spine.parent, Some(hips.id));
    assert_eq!(head.parent, Some(spine.id));
    assert_close(spine.node_to_world.translation, DVec3::new(-10.0, 0.0, 0.0));
    assert_close(head.node_to_world.translation, DVec3::new(-15.0, 0.0, 0.0));
    assert_close(hips.node_to_world.transform_vector3(DVec3::X), DVec3::Y);

    let ancestors: Vec<_> = scene.ancestors(head.id).map(|n| n.name.as_str()).collect();
    assert_eq!(ancestors, vec!["Spine", "Hips", ""]);

    let prop = scene.find_node("Prop").unwrap();
    assert_close(prop.local_transform.scale, DVec3::splat(2.0));
    assert!(prop.local_transform.to_affine().abs_diff_eq(prop.node_to_parent, EPSILON));
    assert_eq!(column_major(&prop.geometry_transform)[12..15], [0.0, 0.0, 7.0]);
    assert_close(prop.node_to_world.translation, DVec3::ZERO);
    assert!(prop.visible);

    let hidden = scene.find_node("Hidden").unwrap();
    assert!(!hidden.visible);
    assert_close(hidden.node_to_world.transform_vector3(DVec3::X), DVec3::new(2.0, 0.0, 0.0));
    // Geometric offsets are not inherited.
    assert_close(hidden.node_to_world.translation, DVec3::ZERO);

    let settings = scene.settings();
    assert_eq!(settings.axes.up, CoordinateAxis::PositiveZ);
    assert_eq!(settings.axes.front, CoordinateAxis::NegativeY);
    assert_eq!(settings.axes.right, CoordinateAxis::PositiveX);
    assert!((settings.unit_meters - 1.0).abs() < EPSILON);
    assert_eq!(scene.metadata().creator, "fbxscene rig fixture");
}

#[test]
fn rig_bones() {
    let scene = load_testcase("rig.fbx");
    assert_eq!(scene.bones().len(), 2);

    let hips = scene.find_node("Hips").unwrap();
    let hips_bone = &scene[hips.bone.unwrap()];
    assert_eq!(hips_bone.name, "HipsAttr");
    assert_eq!(hips_bone.radius, 5.0);
    assert_eq!(hips_bone.relative_length, 1.0);
    assert!(hips_bone.is_root);
    assert_eq!(hips_bone.instances, vec![hips.id]);

    let spine = scene.find_node("Spine").unwrap();
    let spine_bone = &scene[spine.bone.unwrap()];
    // Size comes from the FbxSkeleton template.
    assert_eq!(spine_bone.radius, 3.0);
    assert_eq!(spine_bone.relative_length, 0.5);
    assert!(!spine_bone.is_root);

    assert!(scene.find_node("Head").unwrap().bone.is_none());
}

#[test]
fn rig_materials_and_textures() {
    let scene = load_testcase("rig.fbx");
    let spine = scene.find_node("Spine").unwrap();
    assert_eq!(spine.materials.len(), 1);

    let skin = scene.find_material("Skin").unwrap();
    assert_eq!(skin.id, spine.materials[0]);
    assert_eq!(skin.shading_model, "lambert");
    assert_eq!(skin.textures.len(), 1);
    assert_eq!(skin.textures[0].property, "DiffuseColor");
    assert_eq!(skin.texture_for("DiffuseColor"), Some(skin.textures[0].texture));
    assert_eq!(skin.texture_for("NormalMap"), None);

    let texture = &scene[skin.textures[0].texture];
    assert_eq!(texture.name, "SkinTex");
    assert_eq!(texture.texture_type, TextureType::File);
    assert_eq!(texture.uv_set, "map1");
    assert_eq!(texture.wrap_u, WrapMode::Clamp);
    assert_eq!(texture.wrap_v, WrapMode::Repeat);
    // Filled in from the connected video.
    assert!(texture.has_file());
    assert_eq!(texture.filename, "C:/assets/textures/skin.png");
    assert_eq!(texture.relative_filename, "textures\\skin.png");
    let expected = testcase("textures/skin.png");
    assert_eq!(texture.absolute_filename, expected.to_string_lossy());
    assert!(texture.content.is_empty());
    assert!(std::ptr::eq(scene.find_texture("SkinTex").unwrap(), texture));
}

#[test]
fn memory_loads_keep_document_paths() {
    init_logger();
    let data = std::fs::read(testcase("rig.fbx")).unwrap();
    let scene = load_memory_with(&data, &LoadOptions::default()).unwrap();
    let texture = scene.find_texture("SkinTex").unwrap();
    assert_eq!(texture.absolute_filename, "C:/assets/textures/skin.png");
}

#[test]
fn rig_skinning() {
    let scene = load_testcase("rig.fbx");
    assert_tree(&scene);
    assert_eq!(scene.skin_deformers().len(), 1);
    assert_eq!(scene.skin_clusters().len(), 2);

    let body = &scene.meshes()[0];
    assert_eq!(body.name, "Body");
    assert_eq!(body.instances, vec![scene.find_node("Prop").unwrap().id]);
    assert_eq!(body.skin_deformers.len(), 1);

    let skin = &scene[body.skin_deformers[0]];
    assert_eq!(skin.name, "BodySkin");
    assert_eq!(skin.skinning_method, SkinningMethod::DualQuaternion);
    assert_eq!(skin.meshes, vec![body.id]);
    assert_eq!(skin.clusters.len(), 2);

    let hips = &scene[skin.clusters[0]];
    assert_eq!(hips.name, "HipsCluster");
    assert_eq!(hips.bone_node, Some(scene.find_node("Hips").unwrap().id));
    // Index 7 lies past the four control points of the mesh.
    assert_eq!(hips.vertices, vec![0, 1]);
    assert_eq!(hips.weights, vec![1.0, 0.5]);
    assert_close(hips.geometry_to_bone.translation, DVec3::new(1.0, 2.0, 3.0));
    assert_close(hips.bind_to_world.translation, DVec3::new(-1.0, -2.0, -3.0));
    assert_eq!(column_major(&hips.geometry_to_bone)[12..16], [1.0, 2.0, 3.0, 1.0]);

    let spine = &scene[skin.clusters[1]];
    assert_eq!(spine.name, "SpineCluster");
    assert_eq!(spine.bone_node, Some(scene.find_node("Spine").unwrap().id));
    assert_eq!(spine.vertices, vec![2, 3]);
    assert_eq!(spine.weights, vec![0.5, 1.0]);
    assert_eq!(spine.geometry_to_bone, DAffine3::IDENTITY);
    assert_eq!(spine.bind_to_world, DAffine3::IDENTITY);
}

#[test]
fn skins_without_meshes() {
    let scene = load_ascii(
        "Deformer: 1, \"Deformer::Plain\", \"Skin\" {\n}\n\
         Deformer: 2, \"Deformer::Odd\", \"Skin\" {\n\tSkinningType: \"Wobbly\"\n}\n\
         Deformer: 3, \"SubDeformer::Loose\", \"Cluster\" {\n\
         \tIndexes: *3 {\n a: 4,-1,9\n }\n\
         \tWeights: *2 {\n a: 0.5,1\n }\n\
         \tTransform: *4 {\n a: 1,2,3,4\n }\n\
         }\n\
         Model: 10, \"Model::A\", \"Null\" {\n}\n\
         Model: 11, \"Model::B\", \"Null\" {\n}\n",
        "C: \"OO\",3,1\nC: \"OO\",10,3\nC: \"OO\",11,3\n",
    );
    assert_tree(&scene);

    let plain = &scene.skin_deformers()[0];
    assert_eq!(plain.skinning_method, SkinningMethod::Linear);
    assert!(plain.meshes.is_empty());
    assert_eq!(scene.skin_deformers()[1].skinning_method, SkinningMethod::Unknown);

    let loose = &scene.skin_clusters()[0];
    assert_eq!(plain.clusters, vec![loose.id]);
    // The first linked node wins.
    assert_eq!(loose.bone_node, Some(scene.find_node("A").unwrap().id));
    // Negative indices and entries without a weight are dropped.
    assert_eq!(loose.vertices, vec![4]);
    assert_eq!(loose.weights, vec![0.5]);
    assert_eq!(loose.geometry_to_bone, DAffine3::IDENTITY);
}

#[test]
fn parent_cycles_are_broken() {
    let scene = load_ascii(
        "Model: 1, \"Model::A\", \"Null\" {\n}\n\
         Model: 2, \"Model::B\", \"Null\" {\n}\n\
         Model: 3, \"Model::C\", \"Null\" {\n}\n\
         Model: 4, \"Model::Loop\", \"Null\" {\n}\n",
        "C: \"OO\",1,2\n\
         C: \"OO\",2,1\n\
         C: \"OO\",3,2\n\
         C: \"OO\",4,4\n",
    );
    assert_tree(&scene);
    let a = scene.find_node("A").unwrap();
    let b = scene.find_node("B").unwrap();
    let c = scene.find_node("C").unwrap();
    assert_eq!(a.parent, Some(NodeId(0)));
    assert_eq!(b.parent, Some(a.id));
    assert_eq!(c.parent, Some(b.id));
    assert_eq!(scene.find_node("Loop").unwrap().parent, Some(NodeId(0)));
}

#[test]
fn first_parent_wins() {
    let scene = load_ascii(
        "Model: 1, \"Model::A\", \"Null\" {\n}\n\
         Model: 2, \"Model::B\", \"Null\" {\n}\n\
         Model: 3, \"Model::C\", \"Null\" {\n}\n",
        "C: \"OO\",1,0\n\
         C: \"OO\",2,0\n\
         C: \"OO\",3,1\n\
         C: \"OO\",3,2\n\
         C: \"OO\",3,999\n\
         C: \"OO\",777,1\n",
    );
    assert_tree(&scene);
    let a = scene.find_node("A").unwrap();
    let b = scene.find_node("B").unwrap();
    assert_eq!(scene.find_node("C").unwrap().parent, Some(a.id));
    assert!(b.children.is_empty());
}

#[test]
fn unconnected_models_attach_to_root() {
    let scene = load_ascii("Model: 1, \"Model::Lonely\", \"Null\" {\n}\n", "");
    assert_tree(&scene);
    assert_eq!(scene.root_node().children, vec![NodeId(1)]);
}

#[test]
fn transform_pivots_and_rotation_order() {
    let scene = load_ascii(
        "Model: 1, \"Model::Pivoted\", \"Null\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"RotationPivot\", \"Vector3D\", \"Vector\", \"\",1,0,0\n\
         \t\tP: \"Lcl Rotation\", \"Lcl Rotation\", \"\", \"A\",0,0,180\n\
         \t}\n\
         }\n\
         Model: 2, \"Model::Ordered\", \"Null\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"RotationOrder\", \"enum\", \"\", \"\",5\n\
         \t\tP: \"Lcl Rotation\", \"Lcl Rotation\", \"\", \"A\",90,90,0\n\
         \t}\n\
         }\n\
         Model: 3, \"Model::PreRotated\", \"Null\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"PreRotation\", \"Vector3D\", \"Vector\", \"\",0,0,90\n\
         \t\tP: \"Lcl Rotation\", \"Lcl Rotation\", \"\", \"A\",0,0,90\n\
         \t}\n\
         }\n",
        "",
    );

    // Rotating half a turn around a pivot at x = 1 moves the origin to x = 2.
    let pivoted = scene.find_node("Pivoted").unwrap();
    assert_close(pivoted.node_to_parent.transform_point3(DVec3::ZERO), DVec3::new(2.0, 0.0, 0.0));

    // ZYX applies Z first and X last: Y carries +Z onto +X, which X leaves alone.
    let ordered = scene.find_node("Ordered").unwrap();
    assert_eq!(ordered.rotation_order, crate::scene::RotationOrder::Zyx);
    assert_close(ordered.node_to_parent.transform_vector3(DVec3::Z), DVec3::X);

    let pre = scene.find_node("PreRotated").unwrap();
    assert_close(pre.node_to_parent.transform_vector3(DVec3::X), DVec3::new(-1.0, 0.0, 0.0));
}

const POLY_MESH: &str = "Geometry: 10, \"Geometry::Poly\", \"Mesh\" {\n\
    Vertices: *15 {\n a: 0,0,0,1,0,0,1,1,0,0,1,0,2,0,0\n }\n\
    PolygonVertexIndex: *7 {\n a: 0,1,2,-4,1,4,-3\n }\n\
    LayerElementNormal: 0 {\n\
        MappingInformationType: \"ByPolygon\"\n\
        ReferenceInformationType: \"Direct\"\n\
        Normals: *6 {\n a: 0,0,1,0,0,-1\n }\n\
    }\n\
    LayerElementColor: 0 {\n\
        MappingInformationType: \"AllSame\"\n\
        ReferenceInformationType: \"IndexToDirect\"\n\
        Colors: *4 {\n a: 1,0,0,1\n }\n\
        ColorIndex: *1 {\n a: 0\n }\n\
    }\n\
    LayerElementUV: 0 {\n\
        MappingInformationType: \"ByPolygonVertex\"\n\
        ReferenceInformationType: \"IndexToDirect\"\n\
        UV: *4 {\n a: 0,0,1,1\n }\n\
        UVIndex: *7 {\n a: 0,1,0,1,0,9,1\n }\n\
    }\n\
    LayerElementMaterial: 0 {\n\
        MappingInformationType: \"ByPolygon\"\n\
        ReferenceInformationType: \"IndexToDirect\"\n\
        Materials: *2 {\n a: 1,0\n }\n\
    }\n\
}\n";

fn load_poly(handling: IndexErrorHandling) -> crate::Result<Scene> {
    init_logger();
    let options = LoadOptions {
        index_error_handling: handling,
        ..LoadOptions::default()
    };
    load_memory_with(ascii_document(POLY_MESH, "").as_bytes(), &options)
}

#[test]
fn mesh_layers() {
    let scene = load_poly(IndexErrorHandling::Clamp).unwrap();
    let mesh = &scene.meshes()[0];
    assert_eq!(mesh.num_vertices, 5);
    assert_eq!(mesh.num_indices, 7);
    assert_eq!(mesh.num_faces, 2);
    assert_eq!(mesh.faces[0].num_indices, 4);
    assert_eq!(mesh.faces[1].num_indices, 3);
    assert_eq!(mesh.num_triangles, 3);
    assert_eq!(mesh.vertex_position.indices, vec![0, 1, 2, 3, 1, 4, 2]);

    assert_eq!(mesh.vertex_normal.indices, vec![0, 0, 0, 0, 1, 1, 1]);
    assert_eq!(mesh.vertex_normal.get(6), Some(Vec3::NEG_Z));
    assert_eq!(mesh.vertex_color.indices, vec![0; 7]);
    assert_eq!(mesh.vertex_color.get(3), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    // Index 9 is clamped onto the last UV.
    assert_eq!(mesh.vertex_uv.indices, vec![0, 1, 0, 1, 0, 1, 1]);
    assert_eq!(mesh.face_material, vec![1, 0]);
    // Not instanced by any node.
    assert!(mesh.instances.is_empty());
    assert!(mesh.materials.is_empty());
}

#[test]
fn mesh_index_error_handling() {
    let scene = load_poly(IndexErrorHandling::NoIndex).unwrap();
    let mesh = &scene.meshes()[0];
    assert!(!mesh.vertex_uv.exists());
    assert!(mesh.vertex_uv.indices.is_empty());
    assert!(mesh.vertex_normal.exists());

    match load_poly(IndexErrorHandling::Abort) {
        Err(Error::BadIndex { mesh, attribute, index }) => {
            assert_eq!(mesh, "Poly");
            assert_eq!(attribute, "uv");
            assert_eq!(index, 9);
        }
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
}

#[test]
fn mesh_bad_vertex_indices() {
    let objects = "Geometry: 10, \"Geometry::Broken\", \"Mesh\" {\n\
        Vertices: *9 {\n a: 0,0,0,1,0,0,0,1,0\n }\n\
        PolygonVertexIndex: *3 {\n a: 0,1,-6\n }\n\
    }\n";
    let scene = load_ascii(objects, "");
    let mesh = &scene.meshes()[0];
    assert_eq!(mesh.vertex_position.indices, vec![0, 1, 2]);
    assert_eq!(mesh.num_triangles, 1);

    let options = LoadOptions {
        index_error_handling: IndexErrorHandling::NoIndex,
        ..LoadOptions::default()
    };
    let scene = load_memory_with(ascii_document(objects, "").as_bytes(), &options).unwrap();
    let mesh = &scene.meshes()[0];
    assert_eq!(mesh.num_vertices, 3);
    assert_eq!(mesh.num_faces, 0);
    assert!(mesh.vertex_position.indices.is_empty());
}

#[test]
fn mesh_wide_vertex_indices() {
    // 2^32 would alias vertex 0 if narrowed to 32 bits.
    let objects = "Geometry: 10, \"Geometry::Wide\", \"Mesh\" {\n\
        Vertices: *9 {\n a: 0,0,0,1,0,0,0,1,0\n }\n\
        PolygonVertexIndex: *3 {\n a: 4294967296,1,-3\n }\n\
    }\n";
    let scene = load_ascii(objects, "");
    assert_eq!(scene.meshes()[0].vertex_position.indices, vec![2, 1, 2]);

    let options = LoadOptions {
        index_error_handling: IndexErrorHandling::Abort,
        ..LoadOptions::default()
    };
    match load_memory_with(ascii_document(objects, "").as_bytes(), &options) {
        Err(Error::BadIndex { mesh, attribute, index }) => {
            assert_eq!(mesh, "Wide");
            assert_eq!(attribute, "position");
            assert_eq!(index, 1 << 32);
        }
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
}

#[test]
fn mesh_unterminated_polygon() {
    let scene = load_ascii(
        "Geometry: 10, \"Geometry::Open\", \"Mesh\" {\n\
            Vertices: *9 {\n a: 0,0,0,1,0,0,0,1,0\n }\n\
            PolygonVertexIndex: *3 {\n a: 0,1,2\n }\n\
        }\n",
        "",
    );
    let mesh = &scene.meshes()[0];
    assert_eq!(mesh.num_faces, 1);
    assert_eq!(mesh.faces[0].num_indices, 3);
    assert_eq!(mesh.num_triangles, 1);
}

#[test]
fn ignore_geometry() {
    init_logger();
    let options = LoadOptions {
        ignore_geometry: true,
        ..LoadOptions::default()
    };
    let scene = crate::load_file_with(testcase("scenario.fbx"), &options).unwrap();
    let mesh = &scene.meshes()[0];
    assert_eq!(mesh.name, "Quad");
    assert_eq!(mesh.num_indices, 0);
    assert!(!mesh.vertex_position.exists());
    assert_eq!(mesh.instances.len(), 1);
    assert_eq!(mesh.materials.len(), 1);
}

#[test]
fn camera_aperture_modes() {
    let scene = load_ascii(
        "NodeAttribute: 1, \"NodeAttribute::Focal\", \"Camera\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"ApertureMode\", \"enum\", \"\", \"\",3\n\
         \t\tP: \"FocalLength\", \"Number\", \"\", \"A\",50\n\
         \t\tP: \"FilmWidth\", \"double\", \"Number\", \"\",1\n\
         \t\tP: \"FilmHeight\", \"double\", \"Number\", \"\",0.5\n\
         \t}\n\
         }\n\
         NodeAttribute: 2, \"NodeAttribute::Ortho\", \"Camera\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"CameraProjectionType\", \"enum\", \"\", \"\",1\n\
         \t\tP: \"ApertureMode\", \"enum\", \"\", \"\",1\n\
         \t\tP: \"FieldOfView\", \"FieldOfView\", \"\", \"A\",90\n\
         \t\tP: \"AspectWidth\", \"double\", \"Number\", \"\",2\n\
         \t\tP: \"AspectHeight\", \"double\", \"Number\", \"\",1\n\
         \t\tP: \"OrthoZoom\", \"double\", \"Number\", \"\",2\n\
         \t\tP: \"NearPlane\", \"double\", \"Number\", \"\",0.1\n\
         \t}\n\
         }\n",
        "",
    );
    let focal = &scene.cameras()[0];
    assert_eq!(focal.aperture_mode, ApertureMode::FocalLength);
    assert!((focal.field_of_view_tan.x - 25.4 * 0.5 / 50.0).abs() < EPSILON);
    assert!((focal.field_of_view_tan.y - 12.7 * 0.5 / 50.0).abs() < EPSILON);
    assert!(!focal.resolution_is_pixels);
    // Cameras need not be instanced.
    assert!(focal.instances.is_empty());

    let ortho = &scene.cameras()[1];
    assert_eq!(ortho.projection_mode, ProjectionMode::Orthographic);
    assert!((ortho.field_of_view_deg.x - 90.0).abs() < EPSILON);
    assert!((ortho.field_of_view_tan.x - 1.0).abs() < EPSILON);
    assert!((ortho.field_of_view_tan.y - 0.5).abs() < EPSILON);
    assert_eq!(ortho.orthographic_extent, 60.0);
    assert_eq!(ortho.orthographic_size.x, 60.0);
    assert_eq!(ortho.orthographic_size.y, 30.0);
    assert_eq!(ortho.near_plane, 0.1);
    assert_eq!(ortho.far_plane, 4000.0);
}

#[test]
fn light_kinds() {
    let scene = load_ascii(
        "NodeAttribute: 1, \"NodeAttribute::Sun\", \"Light\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"LightType\", \"enum\", \"\", \"\",1\n\
         \t\tP: \"CastShadows\", \"bool\", \"\", \"\",1\n\
         \t\tP: \"DecayType\", \"enum\", \"\", \"\",0\n\
         \t}\n\
         }\n\
         NodeAttribute: 2, \"NodeAttribute::Panel\", \"Light\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"LightType\", \"enum\", \"\", \"\",3\n\
         \t\tP: \"AreaLightShape\", \"enum\", \"\", \"\",1\n\
         \t\tP: \"CastLight\", \"bool\", \"\", \"\",0\n\
         \t}\n\
         }\n\
         NodeAttribute: 3, \"NodeAttribute::Odd\", \"Light\" {\n\
         \tProperties70:  {\n\
         \t\tP: \"LightType\", \"enum\", \"\", \"\",42\n\
         \t}\n\
         }\n\
         Model: 10, \"Model::SunNode\", \"Light\" {\n}\n",
        "C: \"OO\",10,0\nC: \"OO\",1,10\n",
    );
    let sun = &scene.lights()[0];
    assert_eq!(sun.light_type, LightType::Directional);
    assert_eq!(sun.decay, LightDecay::None);
    assert!(sun.cast_shadows);
    assert_eq!(sun.intensity, 1.0);
    assert_eq!(sun.color, Vec3::ONE);
    assert_eq!(sun.instances, vec![NodeId(1)]);
    assert_eq!(scene.find_node("SunNode").unwrap().light, Some(sun.id));

    let panel = &scene.lights()[1];
    assert_eq!(panel.light_type, LightType::Area);
    assert_eq!(panel.area_shape, LightAreaShape::Sphere);
    assert!(!panel.cast_light);

    assert_eq!(scene.lights()[2].light_type, LightType::Unknown);
}

#[test]
fn missing_global_settings() {
    let scene = load_ascii("", "");
    assert_eq!(scene.nodes().len(), 1);
    assert_eq!(scene.settings().axes.up, CoordinateAxis::Unknown);
    assert_eq!(scene.settings().unit_meters, 0.01);
    assert_eq!(scene.metadata().creator, "");
}

#[test]
#[should_panic]
fn strict_indexing_panics() {
    let scene = load_ascii("", "");
    let _ = &scene[NodeId(7)];
}

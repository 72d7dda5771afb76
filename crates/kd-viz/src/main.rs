use kd_accel::{KdTree, KdTreeOptions, MedianExtent, Traversal};
use kd_viz::{
    generate_scene, render_preview, LeafBoundsVisitor, OrbitCamera, SceneSurface, TreeNavigator,
};
use macroquad::prelude::*;

const PREVIEW_WIDTH: u16 = 160;
const PREVIEW_HEIGHT: u16 = 120;
const PREVIEW_SCALE: f32 = 2.0;

fn build_tree(surfaces: Vec<SceneSurface>, traversal: Traversal) -> Option<KdTree<SceneSurface>> {
    let options = KdTreeOptions::default().with_traversal(traversal);
    match KdTree::build(surfaces, options, &MedianExtent) {
        Ok(tree) => {
            log::info!(
                "kd-tree built ({:?}): {} surfaces, {} nodes, {} leaves, depth {}",
                traversal,
                tree.surfaces().len(),
                tree.node_count(),
                tree.leaf_count(),
                tree.depth()
            );
            Some(tree)
        }
        Err(err) => {
            log::error!("failed to build kd-tree: {err}");
            None
        }
    }
}

#[macroquad::main("kd-tree Visualization")]
async fn main() {
    pretty_env_logger::init();

    let surfaces = generate_scene();
    log::info!("generated scene with {} surfaces", surfaces.len());

    let Some(mut tree) = build_tree(surfaces, Traversal::default()) else {
        return;
    };

    let mut camera = OrbitCamera::new(28.0, 0.6, 0.5)
        .with_zoom(2.0, 8.0, 60.0)
        .with_target(vec3(0.0, 1.0, 0.0));
    let mut navigator = TreeNavigator::new();
    let mut show_all_leaves = false;

    let mut image = render_preview(&tree, &camera, PREVIEW_WIDTH, PREVIEW_HEIGHT);
    let preview = Texture2D::from_image(&image);
    preview.set_filter(FilterMode::Nearest);

    loop {
        let mut stale = camera.update();
        navigator.update(&tree);

        if is_key_pressed(KeyCode::B) {
            show_all_leaves = !show_all_leaves;
        }
        if is_key_pressed(KeyCode::T) {
            let traversal = match tree.options().traversal {
                Traversal::Bounded => Traversal::NearestFirst,
                Traversal::NearestFirst => Traversal::Bounded,
            };
            let Some(rebuilt) = build_tree(tree.into_surfaces(), traversal) else {
                return;
            };
            tree = rebuilt;
            navigator.go_root();
            stale = true;
        }

        if stale {
            image = render_preview(&tree, &camera, PREVIEW_WIDTH, PREVIEW_HEIGHT);
            preview.update(&image);
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        if show_all_leaves {
            tree.visit_leaves(&mut LeafBoundsVisitor);
        } else {
            navigator.render(&tree);
        }

        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), RED);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), GREEN);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0), BLUE);

        set_default_camera();

        let preview_size = vec2(
            PREVIEW_WIDTH as f32 * PREVIEW_SCALE,
            PREVIEW_HEIGHT as f32 * PREVIEW_SCALE,
        );
        draw_texture_ex(
            &preview,
            screen_width() - preview_size.x - 10.0,
            10.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(preview_size),
                ..Default::default()
            },
        );

        draw_text(
            &format!("kd-tree - {} surfaces", tree.surfaces().len()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Depth: {} | Nodes: {} | Leaves: {} | Traversal: {:?} [T]",
                tree.depth(),
                tree.node_count(),
                tree.leaf_count(),
                tree.options().traversal
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(&tree, 70.0);

        draw_text(
            "Drag mouse to rotate, scroll to zoom | [B] all leaves",
            10.0,
            155.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 175.0, 16.0, DARKGRAY);

        next_frame().await
    }
}

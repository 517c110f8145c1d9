use once_cell::sync::Lazy;
use vgscene::{DrawCommand, RecordingCanvas, Scene, SkiaCanvas};
use vgtree::Options;

mod commands;
mod raster;

const SCENE: &str = "
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'
     width='40' height='40'>
    <defs>
        <linearGradient id='lg1' x2='40'>
            <stop offset='0' stop-color='red'/>
            <stop offset='1' stop-color='blue'/>
        </linearGradient>
        <rect id='tile' width='10' height='10'/>
    </defs>
    <g transform='translate(10 10)'>
        <rect id='rect1' width='20' height='20' fill='url(#lg1)' stroke='black'/>
        <circle cx='10' cy='10' r='5' fill='green' display='none'/>
    </g>
    <use xlink:href='#tile' x='30'/>
</svg>
";

/// Commands of `SCENE` at scale 1.
static SCENE_COMMANDS: Lazy<Vec<DrawCommand>> = Lazy::new(|| record_str(SCENE));

pub fn parse(text: &str) -> Scene {
    Scene::from_str(text, &Options::default()).unwrap()
}

pub fn record(scene: &Scene) -> Vec<DrawCommand> {
    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas);
    canvas.commands
}

pub fn record_str(text: &str) -> Vec<DrawCommand> {
    record(&parse(text))
}

pub fn rasterize(scene: &Scene, width: u32, height: u32) -> tiny_skia::Pixmap {
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    {
        let mut canvas = SkiaCanvas::from(pixmap.as_mut());
        scene.render(&mut canvas);
    }
    pixmap
}

/// Checks that every `Save` has a matching `Restore`.
pub fn is_balanced(commands: &[DrawCommand]) -> bool {
    let mut depth = 0i32;
    for cmd in commands {
        match cmd {
            DrawCommand::Save => depth += 1,
            DrawCommand::Restore => depth -= 1,
            _ => {}
        }

        if depth < 0 {
            return false;
        }
    }

    depth == 0
}

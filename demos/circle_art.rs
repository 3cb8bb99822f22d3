//! Circle Art: print, draw and save a picture.
//!
//! Runs an auto flusher for a moment to show periodic frames arriving, then
//! writes `circle_art.bmp` to the current directory.
//!
//! Run with `RUST_LOG=debug` to see the canvas log output.

use crossbeam_channel::bounded;
use easel::{AutoFlusher, Canvas, CanvasConfig, NamedColor};
use std::sync::Arc;
use std::time::Duration;

fn main() -> easel::Result<()> {
    env_logger::init();

    let canvas = Arc::new(Canvas::with_config(
        CanvasConfig::default()
            .with_size(320, 240)
            .with_flush_rate(Duration::from_millis(50)),
    ));

    let (frames_tx, frames_rx) = bounded(8);
    let flusher = AutoFlusher::for_canvas(Arc::clone(&canvas), frames_tx)?;

    canvas.println("Circle Art");
    canvas.println("==========");
    for (i, named) in NamedColor::ALL.iter().enumerate().skip(1) {
        canvas.color(*named);
        canvas.print(format!("{i:>2} "));

        let r = i32::try_from(i).unwrap_or(0) * 6;
        canvas.thickness(1 + r / 40);
        canvas.circle(160, 140, r);
    }
    canvas.println("");

    canvas.color(NamedColor::White);
    canvas.text(8, 220, "zoom 2, saved at 1x");
    canvas.zoom(2);

    std::thread::sleep(Duration::from_millis(200));
    let mut received = 0;
    while let Ok(frame) = frames_rx.try_recv() {
        received += 1;
        if received == 1 {
            println!("first frame: {}x{}", frame.width(), frame.height());
        }
    }
    println!("{received} frame(s) received, {} flushed", flusher.frames());
    flusher.join();

    canvas.save("circle_art.bmp")?;
    println!("wrote circle_art.bmp ({}x{})", canvas.width(), canvas.height());
    Ok(())
}

// CLASSIFICATION: COMMUNITY
// Filename: framebuffer.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Linux fbdev surface.
//!
//! Geometry comes from the fb sysfs directory (`virtual_size`,
//! `bits_per_pixel`, optional `stride`). Drawing goes to a RAM back
//! buffer which [`Surface::flip`] writes to the device node in one go.
//! Supported depths: 32 bpp (XRGB8888, little endian) and 16 bpp (RGB565).

use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use super::{DisplayError, Rgb, Surface};

#[derive(Debug)]
pub struct Framebuffer {
    device: File,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    stride: usize,
    back: Vec<u8>,
}

impl Framebuffer {
    /// Open `device`, reading geometry from `sysfs`.
    pub fn open(device: &Path, sysfs: &Path) -> Result<Self, DisplayError> {
        let (width, height) = parse_size(&read_attr(sysfs, "virtual_size")?)?;
        let bpp: usize = read_attr(sysfs, "bits_per_pixel")?
            .parse()
            .map_err(|_| DisplayError::Geometry("bits_per_pixel".into()))?;
        if bpp != 16 && bpp != 32 {
            return Err(DisplayError::Geometry(format!("{bpp} bits per pixel")));
        }
        let bytes_per_pixel = bpp / 8;
        let stride = match read_attr(sysfs, "stride") {
            Ok(s) => s
                .parse()
                .map_err(|_| DisplayError::Geometry(format!("stride {s:?}")))?,
            Err(_) => width as usize * bytes_per_pixel,
        };
        if stride < width as usize * bytes_per_pixel {
            return Err(DisplayError::Geometry(format!("stride {stride} < width {width}")));
        }
        let device = OpenOptions::new()
            .write(true)
            .open(device)
            .map_err(|source| DisplayError::Open {
                path: device.to_path_buf(),
                source,
            })?;
        debug!("framebuffer {width}x{height} {bpp}bpp stride {stride}");
        Ok(Self {
            device,
            width,
            height,
            bytes_per_pixel,
            stride,
            back: vec![0; stride * height as usize],
        })
    }

    fn pack(&self, Rgb(r, g, b): Rgb) -> [u8; 4] {
        match self.bytes_per_pixel {
            2 => {
                let v = (u16::from(r) >> 3) << 11 | (u16::from(g) >> 2) << 5 | u16::from(b) >> 3;
                let [lo, hi] = v.to_le_bytes();
                [lo, hi, 0, 0]
            }
            _ => [b, g, r, 0xff],
        }
    }
}

fn read_attr(sysfs: &Path, name: &str) -> Result<String, DisplayError> {
    let path = sysfs.join(name);
    fs::read_to_string(&path)
        .map(|s| s.trim().to_owned())
        .map_err(|source| DisplayError::Open { path, source })
}

fn parse_size(s: &str) -> Result<(u32, u32), DisplayError> {
    let bad = || DisplayError::Geometry(format!("virtual_size {s:?}"));
    let (w, h) = s.split_once(',').ok_or_else(bad)?;
    let w: u32 = w.trim().parse().map_err(|_| bad())?;
    let h: u32 = h.trim().parse().map_err(|_| bad())?;
    if w == 0 || h == 0 {
        return Err(bad());
    }
    Ok((w, h))
}

impl Surface for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgb) {
        let px = self.pack(color);
        let bpp = self.bytes_per_pixel;
        for row in self.back.chunks_exact_mut(self.stride) {
            for cell in row[..self.width as usize * bpp].chunks_exact_mut(bpp) {
                cell.copy_from_slice(&px[..bpp]);
            }
        }
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let px = self.pack(color);
        let bpp = self.bytes_per_pixel;
        let at = y as usize * self.stride + x as usize * bpp;
        self.back[at..at + bpp].copy_from_slice(&px[..bpp]);
    }

    fn flip(&mut self) -> Result<(), DisplayError> {
        self.device.seek(SeekFrom::Start(0))?;
        self.device.write_all(&self.back)?;
        self.device.flush()?;
        Ok(())
    }
}

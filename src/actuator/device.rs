//! Opening serial devices.
//!
//! On unix the device is opened read/write without becoming the
//! controlling terminal and, if it is a tty, switched to raw mode at the
//! requested baud rate. Plain files and FIFOs are opened as-is.

use std::fs::File;
use std::io;
use std::path::Path;

use super::error::ActuatorError;

#[cfg(unix)]
pub(super) fn open_device(path: &Path, baud_rate: u32) -> Result<File, ActuatorError> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;
    use std::os::unix::io::AsRawFd;

    let connect_error = |source: io::Error| ActuatorError::Connect {
        device: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NOCTTY)
        .open(path)
        .map_err(connect_error)?;

    // SAFETY: `file` owns the descriptor and outlives the call.
    let is_tty = unsafe { libc::isatty(file.as_raw_fd()) } == 1;
    if is_tty {
        configure_raw(file.as_raw_fd(), baud_rate).map_err(connect_error)?;
    }

    Ok(file)
}

#[cfg(not(unix))]
pub(super) fn open_device(_path: &Path, _baud_rate: u32) -> Result<File, ActuatorError> {
    Err(ActuatorError::Unsupported)
}

/// Put the tty in raw 8N1 mode at `baud_rate`.
#[cfg(unix)]
fn configure_raw(fd: libc::c_int, baud_rate: u32) -> io::Result<()> {
    let speed = baud_constant(baud_rate).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported baud rate {}", baud_rate),
        )
    })?;

    let mut tio = get_attrs(fd)?;
    // SAFETY: `tio` is a valid, initialized termios owned by this frame.
    unsafe { libc::cfmakeraw(&mut tio) };
    tio.c_cflag |= libc::CLOCAL | libc::CREAD;
    // SAFETY: as above; `speed` is one of the libc B* constants.
    if unsafe { libc::cfsetispeed(&mut tio, speed) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: as above.
    if unsafe { libc::cfsetospeed(&mut tio, speed) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `fd` is open for the duration of the call; `tio` is valid.
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &tio) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Current attributes of the tty behind `fd`.
#[cfg(unix)]
fn get_attrs(fd: libc::c_int) -> io::Result<libc::termios> {
    let mut tio = std::mem::MaybeUninit::<libc::termios>::uninit();
    // SAFETY: tcgetattr fully initializes `tio` when it returns 0.
    if unsafe { libc::tcgetattr(fd, tio.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: initialized by the successful call above.
    Ok(unsafe { tio.assume_init() })
}

#[cfg(unix)]
fn baud_constant(baud_rate: u32) -> Option<libc::speed_t> {
    match baud_rate {
        1200 => Some(libc::B1200),
        2400 => Some(libc::B2400),
        4800 => Some(libc::B4800),
        9600 => Some(libc::B9600),
        19200 => Some(libc::B19200),
        38400 => Some(libc::B38400),
        57600 => Some(libc::B57600),
        115200 => Some(libc::B115200),
        _ => None,
    }
}

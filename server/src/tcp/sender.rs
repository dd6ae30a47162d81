use brook::error::BrookError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const STATUS_OK: &[u8] = &[0; 4];

pub(crate) async fn read<T>(stream: &mut T, buffer: &mut [u8]) -> Result<usize, BrookError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    match stream.read_exact(buffer).await {
        Ok(0) if !buffer.is_empty() => Err(BrookError::ConnectionClosed),
        Ok(read_bytes) => Ok(read_bytes),
        Err(error) => {
            if error.kind() == std::io::ErrorKind::UnexpectedEof {
                Err(BrookError::ConnectionClosed)
            } else {
                Err(BrookError::IoError(error))
            }
        }
    }
}

pub(crate) async fn send_empty_ok_response<T>(stream: &mut T) -> Result<(), BrookError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    send_ok_response(stream, &[]).await
}

pub(crate) async fn send_ok_response<T>(stream: &mut T, payload: &[u8]) -> Result<(), BrookError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    send_response(stream, STATUS_OK, payload).await
}

pub(crate) async fn send_error_response<T>(
    stream: &mut T,
    error: BrookError,
) -> Result<(), BrookError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let details = error.details();
    let mut payload = Vec::with_capacity(4 + details.len());
    payload.extend_from_slice(&(details.len() as u32).to_le_bytes());
    payload.extend_from_slice(details.as_bytes());
    send_response(stream, &error.as_code().to_le_bytes(), &payload).await
}

pub(crate) async fn send_response<T>(
    stream: &mut T,
    status: &[u8],
    payload: &[u8],
) -> Result<(), BrookError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    debug!("Sending response with status: {:?}...", status);
    let length = (payload.len() as u32).to_le_bytes();
    stream
        .write_all(&[status, &length, payload].as_slice().concat())
        .await
        .map_err(|_| BrookError::TcpError)?;
    debug!("Sent response with status: {:?}", status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn error_response_should_carry_code_and_details() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send_error_response(&mut server, BrookError::TopicNotFound("orders".to_string()))
            .await
            .unwrap();

        let mut header = [0u8; 8];
        client.read_exact(&mut header).await.unwrap();
        let status = u32::from_le_bytes(header[..4].try_into().unwrap());
        let length = u32::from_le_bytes(header[4..].try_into().unwrap());
        let mut payload = vec![0u8; length as usize];
        client.read_exact(&mut payload).await.unwrap();

        assert_eq!(status, 1003);
        assert_eq!(u32::from_le_bytes(payload[..4].try_into().unwrap()), 6);
        assert_eq!(&payload[4..], b"orders");
    }

    #[tokio::test]
    async fn reading_from_closed_stream_should_fail() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        let mut buffer = [0u8; 4];
        assert!(matches!(
            read(&mut server, &mut buffer).await,
            Err(BrookError::ConnectionClosed)
        ));
    }
}

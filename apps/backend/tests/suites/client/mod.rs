mod session_polling;
